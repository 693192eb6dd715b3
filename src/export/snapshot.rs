use std::collections::HashMap;

use serde::Serialize;

use crate::fit::FitLine;
use crate::project::{Project, WellRecordId};
use crate::well::WellRecord;

/// Everything needed to draw one well's plot, detached from the project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotJob {
    /// Record the job was taken from
    pub id: WellRecordId,
    /// Plate display name
    pub plate_name: String,
    /// Plate coordinate
    pub well_id: String,
    /// Sample label, used for the title
    pub sample_id: String,
    /// Unique file name without extension
    pub file_stem: String,
    /// Timestamps
    pub time: Vec<f64>,
    /// Raw signal
    pub signal: Vec<f64>,
    /// Fit line, empty when the fit is disabled
    pub fit_line: FitLine,
    /// Interval boundaries as time values, `None` when the fit is disabled
    pub interval_times: Option<(f64, f64)>,
    /// Rate, `None` when not computed
    pub slope: Option<f64>,
    /// 95% half-width, `None` when not estimable
    pub confidence: Option<f64>,
}

impl PlotJob {
    fn from_record(id: WellRecordId, plate_name: &str, well: &WellRecord, file_stem: String) -> Self {
        Self {
            id,
            plate_name: plate_name.to_string(),
            well_id: well.well_id().to_string(),
            sample_id: well.sample_id().to_string(),
            file_stem,
            time: well.time_series().to_vec(),
            signal: well.signal_series().to_vec(),
            fit_line: well.fit_line().clone(),
            interval_times: well.fit_enabled().then(|| well.interval_times()),
            slope: well.fit().rate(),
            confidence: well.fit().uncertainty(),
        }
    }
}

/// Read-only copy of every exportable well, handed to the export worker
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportSnapshot {
    jobs: Vec<PlotJob>,
}

impl ExportSnapshot {
    /// Snapshot every non-Control well of the project, in plate order
    pub fn from_project(project: &Project) -> Self {
        let mut names = FileNamer::default();
        let jobs = project
            .result_ids()
            .filter_map(|id| {
                let plate = project.plate(id.plate_index)?;
                let well = plate.well(id.well_index)?;
                let stem = names.unique(well.sample_id(), well.well_id());
                Some(PlotJob::from_record(id, &plate.name, well, stem))
            })
            .collect();
        Self { jobs }
    }

    /// Jobs in export order
    pub fn jobs(&self) -> &[PlotJob] {
        &self.jobs
    }

    /// Number of plots
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// True when there is nothing to export
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub(crate) fn into_jobs(self) -> Vec<PlotJob> {
        self.jobs
    }
}

/// Replace characters that are unsafe in file names with `_`
pub fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_matches('.').to_string()
}

/// Hands out file stems, suffixing repeats with `_2`, `_3`, ...
#[derive(Debug, Default)]
struct FileNamer {
    seen: HashMap<String, usize>,
}

impl FileNamer {
    fn unique(&mut self, sample_id: &str, well_id: &str) -> String {
        let mut base = sanitize_file_stem(sample_id);
        if base.is_empty() {
            base = sanitize_file_stem(well_id);
        }
        loop {
            // Case-insensitive file systems treat "S1" and "s1" as one file
            let count = self.seen.entry(base.to_lowercase()).or_insert(0);
            *count += 1;
            if *count == 1 {
                return base;
            }
            let candidate = format!("{base}_{count}");
            if !self.seen.contains_key(&candidate.to_lowercase()) {
                self.seen.insert(candidate.to_lowercase(), 1);
                return candidate;
            }
        }
    }
}
