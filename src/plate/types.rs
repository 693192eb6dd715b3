use crate::well::WellRecord;

use super::format::{well_to_index, PlateFormat};

/// Well records of one physical plate plus plate-level metadata
#[derive(Debug, Clone)]
pub struct Plate {
    /// Display name
    pub name: String,
    /// File the raw data was imported from
    pub source_file: String,
    /// Well layout
    pub format: PlateFormat,
    wells: Vec<WellRecord>,
}

impl Plate {
    /// Create a plate from already-built records
    pub fn new(
        name: impl Into<String>,
        source_file: impl Into<String>,
        format: PlateFormat,
        wells: Vec<WellRecord>,
    ) -> Self {
        Self {
            name: name.into(),
            source_file: source_file.into(),
            format,
            wells,
        }
    }

    /// Records in import order
    pub fn wells(&self) -> &[WellRecord] {
        &self.wells
    }

    /// Record at `index`
    pub fn well(&self, index: usize) -> Option<&WellRecord> {
        self.wells.get(index)
    }

    pub(crate) fn well_mut(&mut self, index: usize) -> Option<&mut WellRecord> {
        self.wells.get_mut(index)
    }

    pub(crate) fn wells_mut(&mut self) -> impl Iterator<Item = &mut WellRecord> {
        self.wells.iter_mut()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    /// True when the plate holds no records
    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Record index of the well at `well_id`, matching coordinates
    /// regardless of case or zero padding
    pub fn find(&self, well_id: &str) -> Option<usize> {
        match well_to_index(well_id, self.format) {
            Ok(position) => self.find_position(position),
            Err(_) => self.wells.iter().position(|w| w.well_id() == well_id),
        }
    }

    /// Record index of the well at 1-based plate `position`
    pub fn find_position(&self, position: usize) -> Option<usize> {
        self.wells
            .iter()
            .position(|w| well_to_index(w.well_id(), self.format).ok() == Some(position))
    }

    /// Record indices of non-Control wells, in import order
    pub fn result_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.wells
            .iter()
            .enumerate()
            .filter(|(_, w)| !w.is_control())
            .map(|(i, _)| i)
    }
}
