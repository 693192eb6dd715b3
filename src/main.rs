//! # platerate
//!
//! Command-line front end for kinetic plate-reader assays.
//!
//! ## Usage
//!
//! ```bash
//! # Import two plates with a shared layout and save a project
//! platerate analyze run1.csv run2.csv --layout layout.csv -o assay.platerate --results rates.csv
//!
//! # Inspect rates and control statistics
//! platerate info assay.platerate
//!
//! # Pin the interval of one well
//! platerate edit assay.platerate --well B7 --start 2 --stop 9
//!
//! # Render one SVG per sample
//! platerate export-plots assay.platerate -o plots/
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
