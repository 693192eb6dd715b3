//! Explicit ownership of all loaded data: a [`Project`] owns its plates and
//! each plate owns its well records. Records are addressed by a stable
//! [`WellRecordId`] rather than by view text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interval::{IntervalEditor, IntervalError};
use crate::plate::Plate;
use crate::well::WellRecord;

/// Stable address of a well record: plate index and record index within
/// the plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WellRecordId {
    /// Index of the plate within the project
    pub plate_index: usize,
    /// Index of the record within the plate
    pub well_index: usize,
}

impl WellRecordId {
    /// Address record `well_index` of plate `plate_index`
    pub fn new(plate_index: usize, well_index: usize) -> Self {
        Self {
            plate_index,
            well_index,
        }
    }

    /// 1-based plate number as shown to users
    pub fn plate_number(&self) -> usize {
        self.plate_index + 1
    }
}

impl fmt::Display for WellRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plate {} / record {}", self.plate_number(), self.well_index)
    }
}

/// All plates loaded for analysis
#[derive(Debug, Clone, Default)]
pub struct Project {
    plates: Vec<Plate>,
}

impl Project {
    /// Empty project
    pub fn new() -> Self {
        Self::default()
    }

    /// Project over existing plates
    pub fn from_plates(plates: Vec<Plate>) -> Self {
        Self { plates }
    }

    /// Append a plate and return its index
    pub fn add_plate(&mut self, plate: Plate) -> usize {
        self.plates.push(plate);
        self.plates.len() - 1
    }

    /// Plates in load order
    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }

    /// Plate at `index`
    pub fn plate(&self, index: usize) -> Option<&Plate> {
        self.plates.get(index)
    }

    /// Record at `id`
    pub fn get(&self, id: WellRecordId) -> Option<&WellRecord> {
        self.plates.get(id.plate_index)?.well(id.well_index)
    }

    pub(crate) fn get_mut(&mut self, id: WellRecordId) -> Option<&mut WellRecord> {
        self.plates.get_mut(id.plate_index)?.well_mut(id.well_index)
    }

    /// Total number of records
    pub fn well_count(&self) -> usize {
        self.plates.iter().map(Plate::len).sum()
    }

    /// Every record id in plate order
    pub fn ids(&self) -> impl Iterator<Item = WellRecordId> + '_ {
        self.plates.iter().enumerate().flat_map(|(p, plate)| {
            (0..plate.len()).map(move |w| WellRecordId::new(p, w))
        })
    }

    /// Ids of non-Control records in plate order: the results table rows
    pub fn result_ids(&self) -> impl Iterator<Item = WellRecordId> + '_ {
        self.plates.iter().enumerate().flat_map(|(p, plate)| {
            plate.result_indices().map(move |w| WellRecordId::new(p, w))
        })
    }

    /// First non-Control record of the first plate
    pub fn first_result(&self) -> Option<WellRecordId> {
        let plate = self.plates.first()?;
        plate
            .result_indices()
            .next()
            .map(|w| WellRecordId::new(0, w))
    }

    /// Refit every record with `editor`, e.g. after loading an archive
    pub fn refit_all(&mut self, editor: &IntervalEditor) -> Result<(), IntervalError> {
        for plate in &mut self.plates {
            for well in plate.wells_mut() {
                editor.refit(well)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::PlateFormat;
    use crate::well::CONTROL_SAMPLE_ID;

    fn well(id: &str, sample: &str) -> WellRecord {
        WellRecord::new(id, sample, vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap()
    }

    fn project() -> Project {
        let first = Plate::new(
            "P1",
            "a.csv",
            PlateFormat::Wells96,
            vec![well("A1", CONTROL_SAMPLE_ID), well("A2", "S1"), well("A3", "S2")],
        );
        let second = Plate::new("P2", "b.csv", PlateFormat::Wells96, vec![well("A1", "S3")]);
        Project::from_plates(vec![first, second])
    }

    #[test]
    fn test_first_result_skips_control() {
        assert_eq!(project().first_result(), Some(WellRecordId::new(0, 1)));
    }

    #[test]
    fn test_result_ids_exclude_controls() {
        let ids: Vec<_> = project().result_ids().collect();
        assert_eq!(
            ids,
            vec![
                WellRecordId::new(0, 1),
                WellRecordId::new(0, 2),
                WellRecordId::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_lookup() {
        let project = project();
        assert_eq!(project.well_count(), 4);
        assert_eq!(project.ids().count(), 4);
        assert_eq!(project.get(WellRecordId::new(1, 0)).unwrap().sample_id(), "S3");
        assert!(project.get(WellRecordId::new(2, 0)).is_none());
    }

    #[test]
    fn test_refit_all_computes_fits() {
        let mut project = project();
        project.refit_all(&IntervalEditor::default()).unwrap();
        let slope = project.get(WellRecordId::new(0, 2)).unwrap().fit_slope();
        assert!((slope - 1.0).abs() < 1e-12);
    }
}
