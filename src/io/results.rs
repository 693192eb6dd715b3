use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::project::Project;

use super::error::ResultsError;

/// Column headers of the results table
pub const RESULTS_HEADER: [&str; 5] = ["Plate", "Well", "Sample", "Rate", "CI95"];

/// Two decimals, empty when the value is missing or not finite
pub fn format_2dp(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let text = format!("{v:.2}");
            if text == "-0.00" {
                "0.00".to_string()
            } else {
                text
            }
        }
        _ => String::new(),
    }
}

/// One exported result: a non-Control well and its rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    /// 1-based plate number
    pub plate_number: usize,
    /// Plate coordinate
    pub well_id: String,
    /// Sample label
    pub sample_id: String,
    /// Rate, `None` when not computed
    pub rate: Option<f64>,
    /// 95% half-width, `None` when not estimable
    pub ci95: Option<f64>,
}

impl ResultRow {
    fn fields(&self) -> [String; 5] {
        [
            self.plate_number.to_string(),
            self.well_id.clone(),
            self.sample_id.clone(),
            format_2dp(self.rate),
            format_2dp(self.ci95),
        ]
    }
}

/// Result rows for every non-Control well, in plate then record order
pub fn result_rows(project: &Project) -> Vec<ResultRow> {
    project
        .result_ids()
        .filter_map(|id| {
            let well = project.get(id)?;
            Some(ResultRow {
                plate_number: id.plate_number(),
                well_id: well.well_id().to_string(),
                sample_id: well.sample_id().to_string(),
                rate: well.fit().rate(),
                ci95: well.fit().uncertainty(),
            })
        })
        .collect()
}

/// Write the results table with `delimiter`; returns the number of rows
pub fn write_results<W: Write>(
    project: &Project,
    sink: W,
    delimiter: u8,
) -> Result<usize, ResultsError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(sink);
    writer.write_record(RESULTS_HEADER)?;

    let rows = result_rows(project);
    for row in &rows {
        writer.write_record(row.fields())?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Write the results table as a CSV file
pub fn write_results_file(project: &Project, path: impl AsRef<Path>) -> Result<usize, ResultsError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let count = write_results(project, BufWriter::new(file), b',')?;
    log::info!("Wrote {} result rows to {}", count, path.display());
    Ok(count)
}

/// Tab-separated results text for the clipboard
pub fn results_tsv(project: &Project) -> Result<String, ResultsError> {
    let mut buffer = Vec::new();
    write_results(project, &mut buffer, b'\t')?;
    Ok(String::from_utf8(buffer)?)
}
