use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::interval::IntervalEditor;
use crate::plate::{well_to_index, Plate, PlateFormat};
use crate::well::WellRecord;

use super::error::ImportError;

/// Well id to sample id assignments
pub type Layout = HashMap<String, String>;

/// Columns of a wide plate CSV before they become well records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlateData {
    /// Shared time column, seconds
    pub time: Vec<f64>,
    /// `(well_id, signal)` in column order
    pub wells: Vec<(String, Vec<f64>)>,
}

/// Parse a wide CSV: a header row, a time column first, then one column per
/// well named by its well id.
pub fn read_plate_data<R: Read>(reader: R) -> Result<RawPlateData, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.len() < 2 {
        return Err(ImportError::Mismatch(format!(
            "expected a time column and at least one well column, found {} columns",
            headers.len()
        )));
    }

    let mut seen = HashSet::new();
    for (column, well_id) in headers.iter().enumerate().skip(1) {
        if well_id.is_empty() {
            return Err(ImportError::Mismatch(format!(
                "column {} has no well id",
                column + 1
            )));
        }
        if !seen.insert(well_id.to_uppercase()) {
            return Err(ImportError::Mismatch(format!(
                "well {} appears in more than one column",
                well_id
            )));
        }
    }

    let mut time = Vec::new();
    let mut signals: Vec<Vec<f64>> = vec![Vec::new(); headers.len() - 1];

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header is line 1
        let line = row + 2;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != headers.len() {
            return Err(ImportError::Mismatch(format!(
                "line {} has {} fields, header has {}",
                line,
                record.len(),
                headers.len()
            )));
        }

        let mut values = record.iter().enumerate().map(|(column, field)| {
            field.parse::<f64>().map_err(|_| {
                ImportError::Mismatch(format!(
                    "line {}, column '{}': '{}' is not a number",
                    line, headers[column], field
                ))
            })
        });
        if let Some(t) = values.next() {
            time.push(t?);
        }
        for (signal, value) in signals.iter_mut().zip(values) {
            signal.push(value?);
        }
    }

    if time.is_empty() {
        return Err(ImportError::Mismatch("no data rows".to_string()));
    }

    let wells = headers.into_iter().skip(1).zip(signals).collect();
    Ok(RawPlateData { time, wells })
}

/// Parse a two-column `well_id,sample_id` layout. A header row whose first
/// field is `well_id` or `well` is skipped; empty sample ids are ignored.
pub fn read_layout<R: Read>(reader: R) -> Result<Layout, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut layout = Layout::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let well_id = record.get(0).unwrap_or_default();
        let well_id = well_id.trim_start_matches('\u{feff}');
        if well_id.is_empty() {
            continue;
        }
        if row == 0 && matches!(well_id.to_lowercase().as_str(), "well_id" | "well") {
            continue;
        }
        if record.len() != 2 {
            return Err(ImportError::Mismatch(format!(
                "layout line {} has {} fields, expected well_id,sample_id",
                row + 1,
                record.len()
            )));
        }
        let sample_id = record.get(1).unwrap_or_default();
        if sample_id.is_empty() {
            continue;
        }
        if let Some(previous) = layout.insert(well_id.to_uppercase(), sample_id.to_string()) {
            log::warn!(
                "Layout assigns {} twice ('{}' then '{}'); keeping the last",
                well_id,
                previous,
                sample_id
            );
        }
    }
    Ok(layout)
}

/// Read a layout CSV from disk
pub fn read_layout_file(path: impl AsRef<Path>) -> Result<Layout, ImportError> {
    let file = File::open(path)?;
    read_layout(BufReader::new(file))
}

/// Builds plates from raw CSV data and runs the initial auto-fit
#[derive(Debug, Clone, Default)]
pub struct PlateImporter {
    editor: IntervalEditor,
    format: Option<PlateFormat>,
}

impl PlateImporter {
    /// Importer fitting with `editor`; the plate format is inferred from the
    /// well count unless set with [`with_format`](Self::with_format)
    pub fn new(editor: IntervalEditor) -> Self {
        Self {
            editor,
            format: None,
        }
    }

    /// Force a plate format
    pub fn with_format(mut self, format: PlateFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Build a plate from parsed columns. Wells missing from `layout` use
    /// their well id as sample id.
    pub fn build(
        &self,
        name: impl Into<String>,
        source_file: impl Into<String>,
        data: RawPlateData,
        layout: Option<&Layout>,
    ) -> Result<Plate, ImportError> {
        let name = name.into();
        let format = match self.format {
            Some(format) => format,
            None => PlateFormat::for_well_count(data.wells.len())?,
        };
        if data.wells.len() > format.wells() {
            return Err(ImportError::Mismatch(format!(
                "{} wells do not fit a {}-well plate",
                data.wells.len(),
                format.wells()
            )));
        }

        let mut wells = Vec::with_capacity(data.wells.len());
        for (well_id, signal) in data.wells {
            if well_to_index(&well_id, format).is_err() {
                log::warn!("Plate {}: '{}' is not a {} coordinate", name, well_id, format);
            }
            let sample_id = layout
                .and_then(|l| l.get(&well_id.to_uppercase()))
                .cloned()
                .unwrap_or_else(|| well_id.clone());
            let mut well = WellRecord::new(well_id, sample_id, data.time.clone(), signal)?;
            self.editor.initialize(&mut well)?;
            wells.push(well);
        }

        if let Some(layout) = layout {
            let known: HashSet<String> = wells.iter().map(|w| w.well_id().to_uppercase()).collect();
            for well_id in layout.keys().filter(|id| !known.contains(*id)) {
                log::warn!("Plate {}: layout names {} but the data has no such column", name, well_id);
            }
        }

        log::info!(
            "Imported plate {} ({} wells, {} time points)",
            name,
            wells.len(),
            data.time.len()
        );
        Ok(Plate::new(name, source_file, format, wells))
    }

    /// Parse and build a plate from readers
    pub fn import<R: Read>(
        &self,
        name: impl Into<String>,
        source_file: impl Into<String>,
        data: R,
        layout: Option<&Layout>,
    ) -> Result<Plate, ImportError> {
        let raw = read_plate_data(data)?;
        self.build(name, source_file, raw, layout)
    }

    /// Import a plate CSV from disk, optionally with a layout CSV. The plate
    /// is named after the data file's stem.
    pub fn import_file(
        &self,
        data_path: impl AsRef<Path>,
        layout_path: Option<&Path>,
    ) -> Result<Plate, ImportError> {
        let data_path = data_path.as_ref();
        let layout = layout_path.map(read_layout_file).transpose()?;
        let name = data_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "plate".to_string());
        let source_file = data_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let file = File::open(data_path)?;
        self.import(name, source_file, BufReader::new(file), layout.as_ref())
    }
}
