use super::error::FitError;
use super::student_t::t_critical_95;
use super::types::{FitLine, LinearFit, FitStatus};

/// Fit `signal = intercept + slope * time` over the inclusive interval
/// `[start, stop]`.
///
/// Pure: identical inputs always give bit-identical outputs. Intervals with
/// fewer than two points yield [`LinearFit::insufficient`].
pub fn fit(time: &[f64], signal: &[f64], start: usize, stop: usize) -> Result<LinearFit, FitError> {
    if time.len() != signal.len() {
        return Err(FitError::LengthMismatch {
            time: time.len(),
            signal: signal.len(),
        });
    }
    let len = time.len();
    for index in [start, stop] {
        if index >= len {
            return Err(FitError::IndexOutOfRange { index, len });
        }
    }
    if stop <= start {
        return Ok(LinearFit::insufficient(usize::from(stop == start)));
    }

    let moments = Moments::from_points(&time[start..=stop], &signal[start..=stop]);
    Ok(moments.into_fit(time[start], time[stop]))
}

/// Centered second moments of a point set
#[derive(Debug, Clone, Copy)]
pub(super) struct Moments {
    pub n: usize,
    pub mean_t: f64,
    pub mean_y: f64,
    pub sxx: f64,
    pub sxy: f64,
    pub syy: f64,
}

impl Moments {
    /// Two-pass accumulation for numerical stability
    pub fn from_points(t: &[f64], y: &[f64]) -> Self {
        let n = t.len();
        let nf = n as f64;
        let mean_t = t.iter().sum::<f64>() / nf;
        let mean_y = y.iter().sum::<f64>() / nf;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        for (&ti, &yi) in t.iter().zip(y) {
            let dt = ti - mean_t;
            let dy = yi - mean_y;
            sxx += dt * dt;
            sxy += dt * dy;
            syy += dy * dy;
        }

        Self {
            n,
            mean_t,
            mean_y,
            sxx,
            sxy,
            syy,
        }
    }

    pub fn slope(&self) -> f64 {
        self.sxy / self.sxx
    }

    /// Residual sum of squares, clamped against rounding below zero
    pub fn sse(&self) -> f64 {
        (self.syy - self.slope() * self.sxy).max(0.0)
    }

    pub fn r_squared(&self) -> f64 {
        if self.syy > 0.0 {
            1.0 - self.sse() / self.syy
        } else {
            // flat signal is fitted exactly by a flat line
            1.0
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.n < 2 || self.sxx <= 0.0 || !self.sxx.is_finite()
    }

    pub fn into_fit(self, t_first: f64, t_last: f64) -> LinearFit {
        if self.is_degenerate() {
            return LinearFit::insufficient(self.n);
        }

        let slope = self.slope();
        let intercept = self.mean_y - slope * self.mean_t;

        let confidence_halfwidth = if self.n >= 3 {
            let dof = self.n - 2;
            let se_slope = (self.sse() / dof as f64 / self.sxx).sqrt();
            t_critical_95(dof) * se_slope
        } else {
            f64::NAN
        };

        LinearFit {
            slope,
            intercept,
            confidence_halfwidth,
            r_squared: self.r_squared(),
            n_points: self.n,
            status: FitStatus::Computed,
            line: FitLine {
                time: vec![t_first, t_last],
                values: vec![intercept + slope * t_first, intercept + slope * t_last],
            },
        }
    }
}
