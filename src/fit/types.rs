use serde::{Deserialize, Serialize};

/// Inclusive index interval `[start, stop]` used for a linear fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FitInterval {
    /// First index included in the fit
    pub start: usize,
    /// Last index included in the fit
    pub stop: usize,
}

impl FitInterval {
    /// Create an interval; callers guarantee `start < stop`
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    /// The interval covering a whole series of `len` points
    pub fn full(len: usize) -> Self {
        Self {
            start: 0,
            stop: len.saturating_sub(1),
        }
    }

    /// Number of points covered
    pub fn len(&self) -> usize {
        if self.stop < self.start {
            0
        } else {
            self.stop - self.start + 1
        }
    }

    /// True when the interval covers no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `stop - start`
    pub fn span(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }
}

/// Outcome of a fit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FitStatus {
    /// Regression ran over the interval
    Computed,
    /// Fit disabled for the well; no numbers exist
    #[default]
    NotComputed,
    /// Interval held fewer than two points, or time had no spread
    InsufficientPoints,
}

/// Fitted line sampled for overlay rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitLine {
    /// X coordinates (time)
    pub time: Vec<f64>,
    /// Y coordinates (fitted signal)
    pub values: Vec<f64>,
}

impl FitLine {
    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Map the fitted values through `f`, keeping time unchanged
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            time: self.time.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// Regression outputs for one interval of one well
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Rate: signal units per second
    pub slope: f64,
    /// Signal at time zero
    pub intercept: f64,
    /// Half-width of the 95% confidence interval on the slope
    pub confidence_halfwidth: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Number of points in the interval
    pub n_points: usize,
    /// Fit outcome
    pub status: FitStatus,
    /// Line endpoints for rendering
    pub line: FitLine,
}

impl Default for LinearFit {
    fn default() -> Self {
        Self::not_computed()
    }
}

impl LinearFit {
    /// Sentinel for wells whose fit is disabled
    pub fn not_computed() -> Self {
        Self::sentinel(FitStatus::NotComputed, 0)
    }

    /// Sentinel for intervals too small to regress over
    pub fn insufficient(n_points: usize) -> Self {
        Self::sentinel(FitStatus::InsufficientPoints, n_points)
    }

    fn sentinel(status: FitStatus, n_points: usize) -> Self {
        Self {
            slope: f64::NAN,
            intercept: f64::NAN,
            confidence_halfwidth: f64::NAN,
            r_squared: f64::NAN,
            n_points,
            status,
            line: FitLine::default(),
        }
    }

    /// True when slope and intercept hold real regression output
    pub fn is_computed(&self) -> bool {
        self.status == FitStatus::Computed
    }

    /// Slope if computed
    pub fn rate(&self) -> Option<f64> {
        self.is_computed().then_some(self.slope)
    }

    /// Confidence half-width if computed and estimable
    pub fn uncertainty(&self) -> Option<f64> {
        (self.is_computed() && self.confidence_halfwidth.is_finite())
            .then_some(self.confidence_halfwidth)
    }

    /// Evaluate the fitted line at `t`
    pub fn predict(&self, t: f64) -> f64 {
        self.intercept + self.slope * t
    }
}
