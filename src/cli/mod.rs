use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use platerate::plate::PlateFormat;

mod analyze;
mod edit;
mod export_plots;
mod info;
mod results;

mod config;
mod profile;

pub use profile::FitProfile;

/// platerate - kinetic rate analysis for multi-well plates
#[derive(Parser)]
#[command(name = "platerate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Auto-interval profile.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Only very straight segments
    Strict,
    /// Default thresholds
    #[default]
    Standard,
    /// Tolerate noisy curves
    Lenient,
}

impl From<ProfileArg> for FitProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Strict => FitProfile::Strict,
            ProfileArg::Standard => FitProfile::Standard,
            ProfileArg::Lenient => FitProfile::Lenient,
        }
    }
}

/// Plate layout override.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// 8 x 12 wells
    #[value(name = "96")]
    Wells96,
    /// 16 x 24 wells
    #[value(name = "384")]
    Wells384,
}

impl From<FormatArg> for PlateFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Wells96 => PlateFormat::Wells96,
            FormatArg::Wells384 => PlateFormat::Wells384,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Import plate CSVs, auto-fit every well and save a project archive
    Analyze {
        /// Plate data CSVs (time column first, one column per well)
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Layout CSV (well_id,sample_id) applied to every plate
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Output project archive
        #[arg(short, long, value_name = "OUTPUT", default_value = "project.platerate")]
        output: PathBuf,

        /// Also write the results table to this CSV
        #[arg(long, value_name = "FILE")]
        results: Option<PathBuf>,

        /// Plate layout (inferred from the well count when omitted)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Auto-interval profile (strict, standard, lenient)
        #[arg(short = 'p', long, default_value = "standard", value_enum)]
        profile: ProfileArg,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display plates, reference statistics and rate heatmaps of a project
    Info {
        /// Project archive
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Edit the fit of one well and save the project
    Edit {
        /// Project archive
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Well coordinate, e.g. B7
        #[arg(short, long)]
        well: String,

        /// 1-based plate number
        #[arg(long, default_value_t = 1)]
        plate: usize,

        /// New interval start index
        #[arg(long)]
        start: Option<usize>,

        /// New interval stop index
        #[arg(long)]
        stop: Option<usize>,

        /// Enable or disable the fit
        #[arg(long)]
        fit: Option<bool>,

        /// Pin or release the interval
        #[arg(long)]
        manual: Option<bool>,

        /// Auto-interval profile used when re-enabling a fit
        #[arg(short = 'p', long, default_value = "standard", value_enum)]
        profile: ProfileArg,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Save to this path instead of overwriting the input
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Write the results table of a project
    Results {
        /// Project archive
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output CSV (tab-separated text on stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Render one SVG plot per sample on a background thread
    ExportPlots {
        /// Project archive
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "plots")]
        output: PathBuf,

        /// Load render settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Image width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Image height in pixels
        #[arg(long)]
        height: Option<u32>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            inputs,
            layout,
            output,
            results,
            format,
            profile,
            config,
        } => analyze::run(
            inputs,
            layout,
            output,
            results,
            format.map(PlateFormat::from),
            FitProfile::from(profile),
            config,
        ),
        Commands::Info { file, json } => info::run(file, json),
        Commands::Edit {
            file,
            well,
            plate,
            start,
            stop,
            fit,
            manual,
            profile,
            config,
            output,
        } => edit::run(
            file,
            edit::EditRequest {
                well,
                plate,
                start,
                stop,
                fit,
                manual,
            },
            FitProfile::from(profile),
            config,
            output,
        ),
        Commands::Results { file, output } => results::run(file, output),
        Commands::ExportPlots {
            file,
            output,
            config,
            width,
            height,
        } => export_plots::run(file, output, config, width, height),
    }
}
