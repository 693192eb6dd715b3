use crate::fit::{self, FitConfig, FitInterval, LinearFit};
use crate::well::WellRecord;

use super::error::IntervalError;

/// Which end of the fit interval an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// `interval_start_index`
    Start,
    /// `interval_stop_index`
    Stop,
}

/// How a successful boundary edit was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The targeted boundary moved to the picked index
    Moved(FitInterval),
    /// The picked index crossed the opposite boundary and the ends swapped
    Swapped(FitInterval),
}

impl EditOutcome {
    /// Interval after the edit
    pub fn interval(&self) -> FitInterval {
        match self {
            EditOutcome::Moved(interval) | EditOutcome::Swapped(interval) => *interval,
        }
    }
}

/// Applies interval and fit-toggle edits to well records
#[derive(Debug, Clone, Default)]
pub struct IntervalEditor {
    config: FitConfig,
}

impl IntervalEditor {
    /// Editor using `config` for auto-interval detection
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    /// Auto-detection settings
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Initial fit after import: detect the interval unless it is pinned,
    /// then fit.
    pub fn initialize(&self, well: &mut WellRecord) -> Result<(), IntervalError> {
        if well.manual_interval {
            self.refit(well)
        } else {
            self.auto_fit(well)
        }
    }

    /// Move the start boundary
    pub fn set_start(
        &self,
        well: &mut WellRecord,
        new_start: usize,
    ) -> Result<EditOutcome, IntervalError> {
        self.set_boundary(well, Boundary::Start, new_start)
    }

    /// Move the stop boundary
    pub fn set_stop(
        &self,
        well: &mut WellRecord,
        new_stop: usize,
    ) -> Result<EditOutcome, IntervalError> {
        self.set_boundary(well, Boundary::Stop, new_stop)
    }

    /// Move either boundary
    pub fn set_boundary(
        &self,
        well: &mut WellRecord,
        boundary: Boundary,
        index: usize,
    ) -> Result<EditOutcome, IntervalError> {
        let len = well.len();
        if index >= len {
            return Err(IntervalError::IndexOutOfRange { index, len });
        }

        let current = well.interval;
        let outcome = match boundary {
            Boundary::Start => {
                if index == current.stop {
                    return Err(IntervalError::InvalidBoundary { index });
                }
                if index > current.stop {
                    EditOutcome::Swapped(FitInterval::new(current.stop, index))
                } else {
                    EditOutcome::Moved(FitInterval::new(index, current.stop))
                }
            }
            Boundary::Stop => {
                if index == current.start {
                    return Err(IntervalError::InvalidBoundary { index });
                }
                if index < current.start {
                    EditOutcome::Swapped(FitInterval::new(index, current.start))
                } else {
                    EditOutcome::Moved(FitInterval::new(current.start, index))
                }
            }
        };

        let interval = outcome.interval();
        let result = self.compute(well, interval)?;
        well.apply_fit(interval, result);
        well.manual_interval = true;

        log::debug!(
            "Well {}: {:?} -> [{}, {}], slope {}",
            well.well_id,
            boundary,
            interval.start,
            interval.stop,
            well.fit.slope
        );
        Ok(outcome)
    }

    /// Enable or disable the fit.
    ///
    /// Disabling resets every fit output to the not-computed sentinel.
    /// Enabling re-detects the interval when it is not pinned, otherwise
    /// refits over the pinned interval.
    pub fn toggle_fit(&self, well: &mut WellRecord, enabled: bool) -> Result<(), IntervalError> {
        if !enabled {
            well.fit_enabled = false;
            well.fit = LinearFit::not_computed();
            return Ok(());
        }

        let interval = if well.manual_interval {
            well.interval
        } else {
            fit::detect_interval(&well.time_series, &well.signal_series, &self.config)?
        };
        let result = fit::fit(
            &well.time_series,
            &well.signal_series,
            interval.start,
            interval.stop,
        )?;
        well.fit_enabled = true;
        well.apply_fit(interval, result);
        Ok(())
    }

    /// Pin or unpin the interval bounds. Does not refit.
    pub fn toggle_manual_interval(&self, well: &mut WellRecord, manual: bool) {
        well.manual_interval = manual;
    }

    /// Recompute the fit over the current interval
    pub fn refit(&self, well: &mut WellRecord) -> Result<(), IntervalError> {
        let interval = well.interval;
        let result = self.compute(well, interval)?;
        well.fit = result;
        Ok(())
    }

    /// Re-detect the interval and refit
    pub fn auto_fit(&self, well: &mut WellRecord) -> Result<(), IntervalError> {
        let interval =
            fit::detect_interval(&well.time_series, &well.signal_series, &self.config)?;
        let result = self.compute(well, interval)?;
        well.apply_fit(interval, result);
        Ok(())
    }

    fn compute(&self, well: &WellRecord, interval: FitInterval) -> Result<LinearFit, IntervalError> {
        if !well.fit_enabled {
            return Ok(LinearFit::not_computed());
        }
        Ok(fit::fit(
            &well.time_series,
            &well.signal_series,
            interval.start,
            interval.stop,
        )?)
    }
}
