use crate::fit::FitLine;
use crate::project::{Project, WellRecordId};
use crate::well::{normalize, DisplayMode, Normalization, WellRecord};

use super::error::SelectionError;
use super::palette::{palette_color, CurveColor};

/// Number of overlay slots
pub const SLOT_COUNT: usize = 8;

/// Snapshot of one well record placed in a slot
#[derive(Debug, Clone)]
pub struct CurveSlot {
    /// Record the snapshot was taken from
    pub source: WellRecordId,
    /// Sample label shown in the legend
    pub sample_id: String,
    /// Plate coordinate
    pub well_id: String,
    /// Timestamps
    pub time: Vec<f64>,
    /// Raw signal
    pub signal: Vec<f64>,
    /// Fit line for the raw signal, empty when the fit is disabled
    pub fit_line: FitLine,
    /// Display colour
    pub color: CurveColor,
}

impl CurveSlot {
    fn snapshot(source: WellRecordId, well: &WellRecord, color: CurveColor) -> Self {
        Self {
            source,
            sample_id: well.sample_id().to_string(),
            well_id: well.well_id().to_string(),
            time: well.time_series().to_vec(),
            signal: well.signal_series().to_vec(),
            fit_line: well.fit_line().clone(),
            color,
        }
    }

    /// Signal in `mode`
    pub fn values(&self, mode: DisplayMode) -> Vec<f64> {
        match mode {
            DisplayMode::Raw => self.signal.clone(),
            DisplayMode::Normalized => normalize(&self.signal),
        }
    }

    /// Fit line in `mode`, scaled like the signal
    pub fn fit_line_for(&self, mode: DisplayMode) -> FitLine {
        match mode {
            DisplayMode::Raw => self.fit_line.clone(),
            DisplayMode::Normalized => {
                let scale = Normalization::of(&self.signal);
                self.fit_line.map_values(|v| scale.apply(v))
            }
        }
    }
}

/// Eight addressable overlay slots
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    slots: [Option<CurveSlot>; SLOT_COUNT],
    normalized: bool,
    populated: bool,
}

impl SelectionSet {
    /// All slots empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the results-population state: slot 0 holds the first
    /// non-Control record of the first plate, the rest are empty.
    ///
    /// Returns false, leaving every slot empty, when the project has no
    /// such record.
    pub fn populate(&mut self, project: &Project) -> bool {
        self.slots = Default::default();
        self.populated = false;
        let Some(id) = project.first_result() else {
            return false;
        };
        let Some(well) = project.get(id) else {
            return false;
        };
        self.slots[0] = Some(CurveSlot::snapshot(id, well, palette_color(0)));
        self.populated = true;
        true
    }

    /// Put a snapshot of `well` into `slot`, replacing any occupant.
    /// Returns the previous occupant.
    pub fn add(
        &mut self,
        slot: usize,
        id: WellRecordId,
        well: &WellRecord,
    ) -> Result<Option<CurveSlot>, SelectionError> {
        let entry = self.slot_entry(slot)?;
        let color = entry
            .as_ref()
            .map(|occupant| occupant.color)
            .unwrap_or_else(|| palette_color(slot));
        let previous = entry.replace(CurveSlot::snapshot(id, well, color));
        self.populated = true;
        Ok(previous)
    }

    /// Clear `slot`. Fails if it holds the only curve; clearing an empty
    /// slot is a no-op.
    pub fn remove(&mut self, slot: usize) -> Result<Option<CurveSlot>, SelectionError> {
        let occupied = self.occupied_count();
        let entry = self.slot_entry(slot)?;
        if entry.is_none() {
            return Ok(None);
        }
        if occupied == 1 {
            return Err(SelectionError::LastCurveProtected { slot });
        }
        Ok(entry.take())
    }

    /// Assign a display colour to an occupied slot
    pub fn set_color(&mut self, slot: usize, color: CurveColor) -> Result<(), SelectionError> {
        let entry = self
            .slot_entry(slot)?
            .as_mut()
            .ok_or(SelectionError::EmptySlot { slot })?;
        entry.color = color;
        Ok(())
    }

    /// Advance an occupied slot to the next palette colour
    pub fn cycle_color(&mut self, slot: usize) -> Result<CurveColor, SelectionError> {
        let entry = self
            .slot_entry(slot)?
            .as_mut()
            .ok_or(SelectionError::EmptySlot { slot })?;
        entry.color = entry.color.next_in_palette();
        Ok(entry.color)
    }

    /// Flip every slot between raw and normalized rendering; returns the
    /// new state
    pub fn toggle_normalized(&mut self) -> bool {
        self.normalized = !self.normalized;
        self.normalized
    }

    /// Render mode shared by all slots
    pub fn display_mode(&self) -> DisplayMode {
        if self.normalized {
            DisplayMode::Normalized
        } else {
            DisplayMode::Raw
        }
    }

    /// True once a slot has been filled since the last
    /// [`populate`](Self::populate)
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Contents of `slot`, `None` when empty or out of range
    pub fn slot(&self, slot: usize) -> Option<&CurveSlot> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Occupied slots with their indices
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &CurveSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i, s)))
    }

    /// Number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Lowest empty slot
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Slots currently showing record `id`
    pub fn slots_for(&self, id: WellRecordId) -> Vec<usize> {
        self.occupied()
            .filter(|(_, s)| s.source == id)
            .map(|(i, _)| i)
            .collect()
    }

    /// Re-snapshot every slot showing `id` from the record's current state,
    /// keeping colours. Returns the refreshed slots.
    pub fn refresh(&mut self, id: WellRecordId, well: &WellRecord) -> Vec<usize> {
        let slots = self.slots_for(id);
        for &slot in &slots {
            if let Some(entry) = self.slots[slot].as_mut() {
                *entry = CurveSlot::snapshot(id, well, entry.color);
            }
        }
        slots
    }

    fn slot_entry(&mut self, slot: usize) -> Result<&mut Option<CurveSlot>, SelectionError> {
        self.slots
            .get_mut(slot)
            .ok_or(SelectionError::SlotOutOfRange { slot })
    }
}
