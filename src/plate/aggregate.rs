use serde::Serialize;

use crate::well::WellRecord;

use super::format::{index_to_well, well_to_index, PlateFormat};
use super::types::Plate;

/// One plate position as the heatmap sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    /// 1-based row-major position
    pub position: usize,
    /// Plate coordinate
    pub well_id: String,
    /// Sample at this position, if any
    pub sample_id: Option<String>,
    /// Rate, NaN for missing wells or fits not computed
    pub slope: f64,
    /// Index of the backing record within the plate
    pub record: Option<usize>,
}

impl HeatmapCell {
    /// True when a record backs this position
    pub fn has_record(&self) -> bool {
        self.record.is_some()
    }

    /// True when there is a number to colour
    pub fn has_value(&self) -> bool {
        self.slope.is_finite()
    }
}

/// Heatmap-ready mapping of every plate position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateHeatmap {
    /// Layout of the plate
    pub format: PlateFormat,
    /// One cell per position, ordered by position
    pub cells: Vec<HeatmapCell>,
}

impl PlateHeatmap {
    /// Cell at 1-based `position`
    pub fn cell(&self, position: usize) -> Option<&HeatmapCell> {
        position.checked_sub(1).and_then(|i| self.cells.get(i))
    }

    /// Cell at coordinate `well_id`
    pub fn cell_at(&self, well_id: &str) -> Option<&HeatmapCell> {
        well_to_index(well_id, self.format)
            .ok()
            .and_then(|position| self.cell(position))
    }

    /// Cell at zero-based `row` and `column`
    pub fn cell_rc(&self, row: usize, column: usize) -> Option<&HeatmapCell> {
        if row >= self.format.rows() || column >= self.format.columns() {
            return None;
        }
        self.cells.get(row * self.format.columns() + column)
    }

    /// Smallest and largest finite slope, for colour scaling
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .map(|c| c.slope)
            .filter(|s| s.is_finite())
            .fold(None, |range, s| match range {
                None => Some((s, s)),
                Some((lo, hi)) => Some((f64::min(lo, s), f64::max(hi, s))),
            })
    }
}

/// Build the heatmap of `plate`.
///
/// Records whose coordinate does not fit the plate format are skipped with a
/// warning; if two records share a coordinate, the first one wins.
pub fn heatmap(plate: &Plate) -> PlateHeatmap {
    let format = plate.format;
    let mut cells: Vec<HeatmapCell> = (1..=format.wells())
        .map(|position| HeatmapCell {
            position,
            well_id: index_to_well(position, format).unwrap_or_default(),
            sample_id: None,
            slope: f64::NAN,
            record: None,
        })
        .collect();

    for (record_index, well) in plate.wells().iter().enumerate() {
        let position = match well_to_index(well.well_id(), format) {
            Ok(position) => position,
            Err(e) => {
                log::warn!("Plate '{}': {}", plate.name, e);
                continue;
            }
        };
        let cell = &mut cells[position - 1];
        if cell.record.is_some() {
            log::warn!(
                "Plate '{}': duplicate well {}, keeping first record",
                plate.name,
                well.well_id()
            );
            continue;
        }
        cell.sample_id = Some(well.sample_id().to_string());
        cell.slope = well.fit_slope();
        cell.record = Some(record_index);
    }

    PlateHeatmap { format, cells }
}

/// One scatter point per well record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Index of the record within the plate, also the point index
    pub record: usize,
    /// X coordinate: plate position when the coordinate is valid, otherwise
    /// the 1-based record index
    pub x: usize,
    /// Sample label
    pub sample_id: String,
    /// Plate coordinate
    pub well_id: String,
    /// Rate, NaN when not computed
    pub slope: f64,
    /// Confidence half-width, NaN when not estimable
    pub slope_uncertainty: f64,
}

/// Scatter-ready list of `(sample_id, well_id, slope, uncertainty)`, one per
/// record in import order
pub fn scatter(plate: &Plate) -> Vec<ScatterPoint> {
    plate
        .wells()
        .iter()
        .enumerate()
        .map(|(record, well)| ScatterPoint {
            record,
            x: well_to_index(well.well_id(), plate.format).unwrap_or(record + 1),
            sample_id: well.sample_id().to_string(),
            well_id: well.well_id().to_string(),
            slope: well.fit_slope(),
            slope_uncertainty: well.fit_confidence_halfwidth(),
        })
        .collect()
}

/// Slope statistics of a plate's Control wells
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceStats {
    /// Control wells with a computed slope
    pub count: usize,
    /// Mean control slope, NaN when `count == 0`
    pub mean_slope: f64,
    /// Sample standard deviation, NaN when `count < 2`
    pub std_dev: f64,
}

/// Reference statistics over the Control wells of `plate`
pub fn reference_stats(plate: &Plate) -> ReferenceStats {
    let slopes: Vec<f64> = plate
        .wells()
        .iter()
        .filter(|w| w.is_control())
        .filter_map(|w: &WellRecord| w.fit().rate())
        .collect();

    let count = slopes.len();
    if count == 0 {
        return ReferenceStats {
            count,
            mean_slope: f64::NAN,
            std_dev: f64::NAN,
        };
    }

    let mean = slopes.iter().sum::<f64>() / count as f64;
    let std_dev = if count > 1 {
        let var = slopes.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    } else {
        f64::NAN
    };

    ReferenceStats {
        count,
        mean_slope: mean,
        std_dev,
    }
}
