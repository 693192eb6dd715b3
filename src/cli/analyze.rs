use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use platerate::interval::IntervalEditor;
use platerate::io::{save_project, write_results_file, PlateImporter};
use platerate::plate::PlateFormat;
use platerate::project::Project;

use super::config::Config;
use super::profile::FitProfile;

/// Import plate CSVs, auto-fit and save a project archive
pub fn run(
    inputs: Vec<PathBuf>,
    layout: Option<PathBuf>,
    output: PathBuf,
    results: Option<PathBuf>,
    format: Option<PlateFormat>,
    profile: FitProfile,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let fit_config = config.fit_config(profile);

    info!("platerate analyze");
    info!("=================");
    info!("Plates: {}", inputs.len());
    info!("Output: {}", output.display());
    info!(
        "Profile: {} (min span {}, min R² {})",
        profile, fit_config.min_span, fit_config.min_r_squared
    );

    if let Some(layout) = &layout {
        info!("Layout: {}", layout.display());
    }

    let mut importer = PlateImporter::new(IntervalEditor::new(fit_config));
    if let Some(format) = format {
        importer = importer.with_format(format);
    }

    let mut project = Project::new();
    for input in &inputs {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }
        let plate = importer
            .import_file(input, layout.as_deref())
            .with_context(|| format!("Failed to import {}", input.display()))?;
        project.add_plate(plate);
    }

    save_project(&project, &output)
        .with_context(|| format!("Failed to save {}", output.display()))?;

    let fitted = project
        .plates()
        .iter()
        .flat_map(|p| p.wells())
        .filter(|w| w.fit().is_computed())
        .count();
    println!(
        "Analyzed {} plates, {} wells ({} fitted) -> {}",
        project.plates().len(),
        project.well_count(),
        fitted,
        output.display()
    );

    if let Some(results) = results {
        let rows = write_results_file(&project, &results)
            .with_context(|| format!("Failed to write {}", results.display()))?;
        println!("Wrote {} result rows -> {}", rows, results.display());
    }

    Ok(())
}
