use anyhow::{Context, Result};
use std::path::PathBuf;

use platerate::export::{BulkPlotExporter, SvgRenderer};
use platerate::interval::IntervalEditor;
use platerate::io::load_project;
use platerate::sync::{UiEvent, ViewSynchronizer, ViewUpdate};

use super::config::Config;

/// Render one SVG per non-Control sample of a project archive
pub fn run(
    file: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let config = Config::load(config_path.as_deref())?;
    let mut render = config.render_config();
    if let Some(width) = width {
        render.width = width;
    }
    if let Some(height) = height {
        render.height = height;
    }

    let project = load_project(&file, &IntervalEditor::default())
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let mut sync = ViewSynchronizer::new(project, IntervalEditor::default());

    let snapshot = sync
        .handle(UiEvent::ExportRequested)
        .into_iter()
        .find_map(|update| match update {
            ViewUpdate::ExportReady(snapshot) => Some(snapshot),
            _ => None,
        })
        .context("Export could not start")?;

    if snapshot.is_empty() {
        println!("No samples to export");
        sync.finish_export();
        return Ok(());
    }

    println!(
        "Exporting {} plots ({}x{}) to {}",
        snapshot.len(),
        render.width,
        render.height,
        output.display()
    );

    let exporter = BulkPlotExporter::spawn(snapshot, &output, SvgRenderer::new(render))
        .context("Failed to start export")?;

    for progress in exporter.progress().iter() {
        log::info!(
            "[{}/{}] {:>3.0}% {}",
            progress.completed,
            progress.total,
            progress.fraction() * 100.0,
            progress.path.display()
        );
    }

    let result = exporter.finish();
    sync.finish_export();
    let stats = result.context("Export failed")?;
    println!("{}", stats);

    Ok(())
}
