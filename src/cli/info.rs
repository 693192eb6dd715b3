use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use platerate::interval::IntervalEditor;
use platerate::io::{format_2dp, load_project, read_manifest, result_rows, ArchiveManifest, ResultRow};
use platerate::plate::{heatmap, index_to_well, reference_stats, PlateHeatmap, ReferenceStats};
use platerate::project::Project;

#[derive(Serialize)]
struct PlateReport<'a> {
    name: &'a str,
    source_file: &'a str,
    format: usize,
    wells: usize,
    reference: ReferenceStats,
    heatmap: PlateHeatmap,
}

#[derive(Serialize)]
struct InfoReport<'a> {
    manifest: ArchiveManifest,
    plates: Vec<PlateReport<'a>>,
    results: Vec<ResultRow>,
}

/// Display information about a project archive
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let manifest = read_manifest(&file).context("Failed to read archive manifest")?;
    let project = load_project(&file, &IntervalEditor::default())
        .with_context(|| format!("Failed to load {}", file.display()))?;

    if json {
        let report = InfoReport {
            manifest,
            plates: plate_reports(&project),
            results: result_rows(&project),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("platerate Project Information");
    println!("=============================");
    println!("File: {}", file.display());
    println!("Saved: {} by {}", manifest.saved_at.to_rfc3339(), manifest.generator);
    println!();

    for (i, report) in plate_reports(&project).iter().enumerate() {
        println!("Plate {}: {}", i + 1, report.name);
        println!("  Source: {}", report.source_file);
        println!("  Format: {} wells", report.format);
        println!("  Records: {}", report.wells);

        let reference = &report.reference;
        if reference.count > 0 {
            println!(
                "  Controls: n={}, mean rate {}, sd {}",
                reference.count,
                format_2dp(Some(reference.mean_slope)),
                format_2dp(Some(reference.std_dev))
            );
        } else {
            println!("  Controls: none with a computed rate");
        }
        println!();
        print!("{}", render_grid(&report.heatmap));
        println!();
    }

    Ok(())
}

fn plate_reports(project: &Project) -> Vec<PlateReport<'_>> {
    project
        .plates()
        .iter()
        .map(|plate| PlateReport {
            name: &plate.name,
            source_file: &plate.source_file,
            format: plate.format.wells(),
            wells: plate.len(),
            reference: reference_stats(plate),
            heatmap: heatmap(plate),
        })
        .collect()
}

/// Text heatmap: one row per plate row, rates to two decimals, `.` where
/// there is no value
fn render_grid(map: &PlateHeatmap) -> String {
    let columns = map.format.columns();
    let range = map.value_range();
    let mut out = String::from("     ");
    for column in 1..=columns {
        out.push_str(&format!("{:>8}", column));
    }
    out.push('\n');

    for (row_index, row) in map.cells.chunks(columns).enumerate() {
        let label = index_to_well(row_index * columns + 1, map.format)
            .map(|id| id.chars().take_while(|c| c.is_ascii_alphabetic()).collect::<String>())
            .unwrap_or_default();
        out.push_str(&format!("{:>5}", label));
        for cell in row {
            let text = if cell.has_value() {
                format_2dp(Some(cell.slope))
            } else {
                ".".to_string()
            };
            out.push_str(&colorize(&format!("{:>8}", text), cell.slope, range));
        }
        out.push('\n');
    }
    out
}

#[cfg(feature = "colorized_output")]
fn colorize(text: &str, value: f64, range: Option<(f64, f64)>) -> String {
    use console::style;

    match range {
        Some((lo, hi)) if value.is_finite() && hi > lo => {
            let fraction = (value - lo) / (hi - lo);
            if fraction >= 2.0 / 3.0 {
                style(text).red().to_string()
            } else if fraction >= 1.0 / 3.0 {
                style(text).yellow().to_string()
            } else {
                style(text).blue().to_string()
            }
        }
        _ => style(text).dim().to_string(),
    }
}

#[cfg(not(feature = "colorized_output"))]
fn colorize(text: &str, _value: f64, _range: Option<(f64, f64)>) -> String {
    text.to_string()
}
