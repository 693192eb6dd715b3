use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::fit::FitInterval;
use crate::interval::IntervalEditor;
use crate::plate::{Plate, PlateFormat};
use crate::project::Project;
use crate::well::WellRecord;

use super::error::ArchiveError;

/// MIME type stored as the first, uncompressed entry
pub const PLATERATE_MIMETYPE: &str = "application/vnd.platerate+zip";

/// Archive layout version written by this build
pub const ARCHIVE_VERSION: u32 = 1;

/// Relative tolerance for stored slopes against a fresh refit
const SLOPE_TOLERANCE: f64 = 1e-9;

const MANIFEST_ENTRY: &str = "manifest.json";

/// Contents of `manifest.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveManifest {
    /// Archive layout version
    pub format_version: u32,
    /// Program that wrote the archive
    pub generator: String,
    /// Save time
    pub saved_at: DateTime<Utc>,
    /// One entry per plate, in project order
    pub plates: Vec<PlateEntry>,
}

/// Manifest entry describing one plate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateEntry {
    /// Plate display name
    pub name: String,
    /// File the raw data was imported from
    pub source_file: String,
    /// Plate layout
    pub format: PlateFormat,
    /// Number of well records
    pub wells: usize,
    /// Archive entry holding the plate table
    pub entry: String,
}

impl ArchiveManifest {
    fn for_project(project: &Project) -> Self {
        Self {
            format_version: ARCHIVE_VERSION,
            generator: format!("platerate {}", env!("CARGO_PKG_VERSION")),
            saved_at: Utc::now(),
            plates: project
                .plates()
                .iter()
                .enumerate()
                .map(|(i, plate)| PlateEntry {
                    name: plate.name.clone(),
                    source_file: plate.source_file.clone(),
                    format: plate.format,
                    wells: plate.len(),
                    entry: format!("plates/plate_{:03}.csv", i + 1),
                })
                .collect(),
        }
    }
}

/// Row categories of a plate table
mod category {
    pub const SAMPLE_ID: &str = "sample_id";
    pub const TIME: &str = "time";
    pub const SIGNAL: &str = "signal";
    pub const INTERVAL: &str = "interval";
    pub const FIT_ENABLED: &str = "fit_enabled";
    pub const MANUAL_INTERVAL: &str = "manual_interval";
    pub const SLOPE: &str = "slope";
}

/// Save `project` to `path` atomically: the archive is written to a
/// temporary file next to `path` and renamed over it when complete.
pub fn save_project(project: &Project, path: impl AsRef<Path>) -> Result<ArchiveManifest, ArchiveError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    let manifest = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let manifest = write_archive(project, &mut writer)?;
        writer.flush()?;
        manifest
    };
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| ArchiveError::IoError(e.error))?;

    log::info!(
        "Saved {} plates ({} wells) to {}",
        project.plates().len(),
        project.well_count(),
        path.display()
    );
    Ok(manifest)
}

/// Write the archive container to any seekable sink
pub fn write_archive<W: Write + Seek>(
    project: &Project,
    sink: W,
) -> Result<ArchiveManifest, ArchiveError> {
    let manifest = ArchiveManifest::for_project(project);
    let mut zip_writer = ZipWriter::new(sink);

    // mimetype first and uncompressed so it can be sniffed
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .unix_permissions(0o644);
    zip_writer.start_file("mimetype", options)?;
    zip_writer.write_all(PLATERATE_MIMETYPE.as_bytes())?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    zip_writer.start_file(MANIFEST_ENTRY, options)?;
    zip_writer.write_all(serde_json::to_string_pretty(&manifest)?.as_bytes())?;

    for (plate, entry) in project.plates().iter().zip(&manifest.plates) {
        let table = plate_table(plate)?;
        zip_writer.start_file(entry.entry.as_str(), options)?;
        zip_writer.write_all(&table)?;
    }

    zip_writer.finish()?;
    Ok(manifest)
}

/// Serialize one plate as flat `category,well_id,values...` rows
fn plate_table(plate: &Plate) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for well in plate.wells() {
        let id = well.well_id();
        writer.write_record([category::SAMPLE_ID, id, well.sample_id()])?;
        write_numbers(&mut writer, category::TIME, id, well.time_series())?;
        write_numbers(&mut writer, category::SIGNAL, id, well.signal_series())?;
        let interval = well.interval();
        let (start, stop) = (interval.start.to_string(), interval.stop.to_string());
        writer.write_record([category::INTERVAL, id, start.as_str(), stop.as_str()])?;
        writer.write_record([category::FIT_ENABLED, id, bool_text(well.fit_enabled())])?;
        writer.write_record([category::MANUAL_INTERVAL, id, bool_text(well.manual_interval())])?;
        let slope = well.fit().rate().map(|s| s.to_string()).unwrap_or_default();
        writer.write_record([category::SLOPE, id, slope.as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|e| ArchiveError::IoError(e.into_error()))
}

fn write_numbers<W: Write>(
    writer: &mut csv::Writer<W>,
    kind: &str,
    well_id: &str,
    values: &[f64],
) -> Result<(), csv::Error> {
    let mut record = csv::StringRecord::with_capacity(values.len() * 8, values.len() + 2);
    record.push_field(kind);
    record.push_field(well_id);
    for v in values {
        // Display for f64 round-trips exactly
        record.push_field(&v.to_string());
    }
    writer.write_record(&record)
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Load a project archive and refit every record over its stored interval
pub fn load_project(
    path: impl AsRef<Path>,
    editor: &IntervalEditor,
) -> Result<Project, ArchiveError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let project = read_archive(BufReader::new(file), editor)?;
    log::info!(
        "Loaded {} plates ({} wells) from {}",
        project.plates().len(),
        project.well_count(),
        path.display()
    );
    Ok(project)
}

/// Read only the manifest of an archive on disk
pub fn read_manifest(path: impl AsRef<Path>) -> Result<ArchiveManifest, ArchiveError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    check_mimetype(&mut archive)?;
    read_manifest_entry(&mut archive)
}

/// Read an archive from any seekable source
pub fn read_archive<R: Read + Seek>(
    source: R,
    editor: &IntervalEditor,
) -> Result<Project, ArchiveError> {
    let mut archive = ZipArchive::new(source)?;
    check_mimetype(&mut archive)?;
    let manifest = read_manifest_entry(&mut archive)?;

    let mut project = Project::new();
    for entry in &manifest.plates {
        let table = archive.by_name(&entry.entry)?;
        let wells = read_plate_table(table, &entry.entry, editor)?;
        if wells.len() != entry.wells {
            log::warn!(
                "{}: manifest lists {} wells, table holds {}",
                entry.entry,
                entry.wells,
                wells.len()
            );
        }
        project.add_plate(Plate::new(
            entry.name.clone(),
            entry.source_file.clone(),
            entry.format,
            wells,
        ));
    }
    Ok(project)
}

fn check_mimetype<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<(), ArchiveError> {
    let mut mimetype = String::new();
    archive.by_name("mimetype")?.read_to_string(&mut mimetype)?;
    if mimetype.trim() != PLATERATE_MIMETYPE {
        return Err(ArchiveError::InvalidMimetype(mimetype));
    }
    Ok(())
}

fn read_manifest_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<ArchiveManifest, ArchiveError> {
    let manifest: ArchiveManifest = serde_json::from_reader(archive.by_name(MANIFEST_ENTRY)?)?;
    if manifest.format_version > ARCHIVE_VERSION {
        return Err(ArchiveError::UnsupportedVersion(manifest.format_version));
    }
    Ok(manifest)
}

/// Fields of one well collected from its rows
#[derive(Debug, Default)]
struct StoredWell {
    well_id: String,
    sample_id: Option<String>,
    time: Option<Vec<f64>>,
    signal: Option<Vec<f64>>,
    interval: Option<FitInterval>,
    fit_enabled: Option<bool>,
    manual_interval: Option<bool>,
    slope: Option<f64>,
    /// Categories already read for this record
    seen: HashSet<String>,
}

impl StoredWell {
    /// True when `row` belongs to this record: same coordinate and a
    /// category not read yet
    fn accepts(&self, well_id: &str, kind: &str) -> bool {
        self.well_id == well_id && !self.seen.contains(kind)
    }

    fn into_record(self, entry: &str, editor: &IntervalEditor) -> Result<WellRecord, ArchiveError> {
        let missing = |field: &str| ArchiveError::Malformed {
            entry: entry.to_string(),
            message: format!("well {} has no {} row", self.well_id, field),
        };
        let sample_id = self.sample_id.clone().ok_or_else(|| missing(category::SAMPLE_ID))?;
        let time = self.time.clone().ok_or_else(|| missing(category::TIME))?;
        let signal = self.signal.clone().ok_or_else(|| missing(category::SIGNAL))?;
        let interval = self.interval.ok_or_else(|| missing(category::INTERVAL))?;
        let fit_enabled = self.fit_enabled.ok_or_else(|| missing(category::FIT_ENABLED))?;
        let manual = self
            .manual_interval
            .ok_or_else(|| missing(category::MANUAL_INTERVAL))?;

        let mut record = WellRecord::restore(
            self.well_id.clone(),
            sample_id,
            time,
            signal,
            interval,
            fit_enabled,
            manual,
        )?;
        editor.refit(&mut record)?;
        check_stored_slope(&self.well_id, self.slope, record.fit().rate());
        Ok(record)
    }
}

/// Warn when a stored slope disagrees with the recomputed one; the fresh
/// value is kept either way
fn check_stored_slope(well_id: &str, stored: Option<f64>, fresh: Option<f64>) {
    match (stored, fresh) {
        (Some(stored), Some(fresh)) => {
            let scale = stored.abs().max(fresh.abs()).max(f64::MIN_POSITIVE);
            if (stored - fresh).abs() / scale > SLOPE_TOLERANCE {
                log::warn!(
                    "Well {}: stored slope {} differs from recomputed {}; using recomputed",
                    well_id,
                    stored,
                    fresh
                );
            }
        }
        (None, None) => {}
        (stored, fresh) => log::warn!(
            "Well {}: stored slope {:?} but recomputed {:?}; using recomputed",
            well_id,
            stored,
            fresh
        ),
    }
}

fn read_plate_table<R: Read>(
    table: R,
    entry: &str,
    editor: &IntervalEditor,
) -> Result<Vec<WellRecord>, ArchiveError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(table);

    let malformed = |line: usize, message: String| ArchiveError::Malformed {
        entry: entry.to_string(),
        message: format!("line {}: {}", line, message),
    };

    // Rows of one record are contiguous; coordinates may repeat across
    // records, so a record ends when the coordinate changes or a category
    // comes round again
    let mut wells: Vec<StoredWell> = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let line = row + 1;
        if record.len() < 2 {
            return Err(malformed(line, "expected category,well_id,values".to_string()));
        }
        let kind = &record[0];
        let well_id = &record[1];
        let values: Vec<&str> = record.iter().skip(2).collect();

        if !wells.last().is_some_and(|w| w.accepts(well_id, kind)) {
            wells.push(StoredWell {
                well_id: well_id.to_string(),
                ..StoredWell::default()
            });
        }
        let Some(well) = wells.last_mut() else {
            continue;
        };
        well.seen.insert(kind.to_string());

        match kind {
            category::SAMPLE_ID => {
                well.sample_id = Some(values.first().copied().unwrap_or_default().to_string());
            }
            category::TIME | category::SIGNAL => {
                let numbers = values
                    .iter()
                    .map(|v| v.parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| malformed(line, format!("{} for well {}", e, well_id)))?;
                if kind == category::TIME {
                    well.time = Some(numbers);
                } else {
                    well.signal = Some(numbers);
                }
            }
            category::INTERVAL => {
                let bounds = values
                    .iter()
                    .map(|v| v.parse::<usize>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| malformed(line, format!("{} for well {}", e, well_id)))?;
                match bounds.as_slice() {
                    [start, stop] => well.interval = Some(FitInterval::new(*start, *stop)),
                    _ => {
                        return Err(malformed(
                            line,
                            format!("interval for well {} needs start and stop", well_id),
                        ))
                    }
                }
            }
            category::FIT_ENABLED | category::MANUAL_INTERVAL => {
                let flag = values
                    .first()
                    .and_then(|v| v.parse::<bool>().ok())
                    .ok_or_else(|| {
                        malformed(line, format!("{} for well {} is not a boolean", kind, well_id))
                    })?;
                if kind == category::FIT_ENABLED {
                    well.fit_enabled = Some(flag);
                } else {
                    well.manual_interval = Some(flag);
                }
            }
            category::SLOPE => {
                well.slope = values.first().and_then(|v| v.parse::<f64>().ok());
            }
            other => log::warn!("{}: skipping unknown row category '{}'", entry, other),
        }
    }

    wells
        .into_iter()
        .map(|stored| stored.into_record(entry, editor))
        .collect()
}
