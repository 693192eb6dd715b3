use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::fit::{FitInterval, FitLine, LinearFit};

use super::error::WellError;
use super::normalize::{normalize, Normalization};

/// Sample id marking reference wells excluded from results listings
pub const CONTROL_SAMPLE_ID: &str = "Control";

/// Which series the detail view renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Raw instrument signal
    #[default]
    Raw,
    /// Signal rescaled to [0, 1]
    Normalized,
}

/// One reaction curve in one plate well
#[derive(Debug, Clone)]
pub struct WellRecord {
    pub(crate) well_id: String,
    pub(crate) sample_id: String,
    pub(crate) time_series: Vec<f64>,
    pub(crate) signal_series: Vec<f64>,
    pub(crate) normalized_series: Option<Vec<f64>>,
    pub(crate) fit_enabled: bool,
    pub(crate) manual_interval: bool,
    pub(crate) interval: FitInterval,
    pub(crate) fit: LinearFit,
    pub(crate) display_mode: DisplayMode,
}

impl WellRecord {
    /// Build a record with import defaults: fit enabled, automatic interval
    /// covering the whole series, fit not yet computed.
    ///
    /// Use [`crate::interval::IntervalEditor::initialize`] to run the
    /// initial auto-fit.
    pub fn new(
        well_id: impl Into<String>,
        sample_id: impl Into<String>,
        time_series: Vec<f64>,
        signal_series: Vec<f64>,
    ) -> Result<Self, WellError> {
        let well_id = well_id.into().trim().to_string();
        if well_id.is_empty() {
            return Err(WellError::EmptyWellId);
        }
        validate_series(&well_id, &time_series, &signal_series)?;

        let interval = FitInterval::full(time_series.len());
        Ok(Self {
            well_id,
            sample_id: sample_id.into(),
            time_series,
            signal_series,
            normalized_series: None,
            fit_enabled: true,
            manual_interval: false,
            interval,
            fit: LinearFit::not_computed(),
            display_mode: DisplayMode::Raw,
        })
    }

    /// Rebuild a record from persisted state. The fit is left not computed;
    /// callers refit through the interval editor.
    pub fn restore(
        well_id: impl Into<String>,
        sample_id: impl Into<String>,
        time_series: Vec<f64>,
        signal_series: Vec<f64>,
        interval: FitInterval,
        fit_enabled: bool,
        manual_interval: bool,
    ) -> Result<Self, WellError> {
        let mut record = Self::new(well_id, sample_id, time_series, signal_series)?;
        let len = record.len();
        if interval.start >= interval.stop || interval.stop >= len {
            return Err(WellError::InvalidInterval {
                well_id: record.well_id,
                start: interval.start,
                stop: interval.stop,
                len,
            });
        }
        record.interval = interval;
        record.fit_enabled = fit_enabled;
        record.manual_interval = manual_interval;
        Ok(record)
    }

    /// Plate coordinate, e.g. "A1"
    pub fn well_id(&self) -> &str {
        &self.well_id
    }

    /// Sample label
    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    /// True for reference wells
    pub fn is_control(&self) -> bool {
        self.sample_id == CONTROL_SAMPLE_ID
    }

    /// Timestamps in seconds
    pub fn time_series(&self) -> &[f64] {
        &self.time_series
    }

    /// Raw signal values
    pub fn signal_series(&self) -> &[f64] {
        &self.signal_series
    }

    /// Cached normalized signal, if [`normalize`](Self::normalize) ran
    pub fn normalized_series(&self) -> Option<&[f64]> {
        self.normalized_series.as_deref()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.time_series.len()
    }

    /// Always false for a validated record
    pub fn is_empty(&self) -> bool {
        self.time_series.is_empty()
    }

    /// Whether a fit is computed and displayed
    pub fn fit_enabled(&self) -> bool {
        self.fit_enabled
    }

    /// Whether the interval bounds are user-pinned
    pub fn manual_interval(&self) -> bool {
        self.manual_interval
    }

    /// Current fit interval
    pub fn interval(&self) -> FitInterval {
        self.interval
    }

    /// `interval_start_index`
    pub fn interval_start_index(&self) -> usize {
        self.interval.start
    }

    /// `interval_stop_index`
    pub fn interval_stop_index(&self) -> usize {
        self.interval.stop
    }

    /// Interval bounds translated to time values
    pub fn interval_times(&self) -> (f64, f64) {
        (
            self.time_series[self.interval.start],
            self.time_series[self.interval.stop],
        )
    }

    /// Current fit outputs
    pub fn fit(&self) -> &LinearFit {
        &self.fit
    }

    /// `fit_slope`, NaN when not computed
    pub fn fit_slope(&self) -> f64 {
        self.fit.slope
    }

    /// `fit_intercept`, NaN when not computed
    pub fn fit_intercept(&self) -> f64 {
        self.fit.intercept
    }

    /// `fit_confidence_halfwidth`, NaN when not computed or not estimable
    pub fn fit_confidence_halfwidth(&self) -> f64 {
        self.fit.confidence_halfwidth
    }

    /// Fit line as rendered for the raw signal
    pub fn fit_line(&self) -> &FitLine {
        &self.fit.line
    }

    /// Render mode of the detail view
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Switch render mode; stored data and fit are untouched
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if mode == DisplayMode::Normalized {
            self.normalize();
        }
        self.display_mode = mode;
    }

    /// Compute and cache the normalized series
    pub fn normalize(&mut self) -> &[f64] {
        let signal = &self.signal_series;
        self.normalized_series
            .get_or_insert_with(|| normalize(signal))
    }

    /// Scaling used for the normalized series
    pub fn normalization(&self) -> Normalization {
        Normalization::of(&self.signal_series)
    }

    /// Signal in the given mode, computed on the fly if not cached
    pub fn series_for(&self, mode: DisplayMode) -> Cow<'_, [f64]> {
        match mode {
            DisplayMode::Raw => Cow::Borrowed(&self.signal_series),
            DisplayMode::Normalized => match &self.normalized_series {
                Some(cached) => Cow::Borrowed(cached),
                None => Cow::Owned(normalize(&self.signal_series)),
            },
        }
    }

    /// Fit line in the given mode
    pub fn fit_line_for(&self, mode: DisplayMode) -> FitLine {
        match mode {
            DisplayMode::Raw => self.fit.line.clone(),
            DisplayMode::Normalized => {
                let scale = self.normalization();
                self.fit.line.map_values(|v| scale.apply(v))
            }
        }
    }

    /// Index of the sample closest in time to `time`
    pub fn nearest_index(&self, time: f64) -> usize {
        let times = &self.time_series;
        let upper = times.partition_point(|&t| t < time);
        if upper == 0 {
            return 0;
        }
        if upper >= times.len() {
            return times.len() - 1;
        }
        if time - times[upper - 1] <= times[upper] - time {
            upper - 1
        } else {
            upper
        }
    }

    pub(crate) fn apply_fit(&mut self, interval: FitInterval, fit: LinearFit) {
        self.interval = interval;
        self.fit = fit;
    }
}

fn validate_series(well_id: &str, time: &[f64], signal: &[f64]) -> Result<(), WellError> {
    if time.len() != signal.len() {
        return Err(WellError::LengthMismatch {
            well_id: well_id.to_string(),
            time: time.len(),
            signal: signal.len(),
        });
    }
    if time.len() < 2 {
        return Err(WellError::TooFewPoints {
            well_id: well_id.to_string(),
            len: time.len(),
        });
    }
    if let Some(index) = time
        .iter()
        .zip(signal)
        .position(|(t, s)| !t.is_finite() || !s.is_finite())
    {
        return Err(WellError::NonFinite {
            well_id: well_id.to_string(),
            index,
        });
    }
    if let Some(index) = time.windows(2).position(|w| w[1] <= w[0]) {
        return Err(WellError::NonIncreasingTime {
            well_id: well_id.to_string(),
            index: index + 1,
        });
    }
    Ok(())
}
