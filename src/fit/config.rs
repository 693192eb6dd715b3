use serde::{Deserialize, Serialize};

/// Tuning for automatic interval detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Minimum `stop - start` of a detected interval (at least 2)
    pub min_span: usize,

    /// Coefficient of determination a window must reach to count as linear
    pub min_r_squared: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min_span: 2,
            min_r_squared: 0.98,
        }
    }
}

impl FitConfig {
    /// Strict configuration for clean, low-noise kinetics
    pub fn strict() -> Self {
        Self {
            min_span: 3,
            min_r_squared: 0.995,
        }
    }

    /// Lenient configuration for noisy readers
    pub fn lenient() -> Self {
        Self {
            min_span: 2,
            min_r_squared: 0.9,
        }
    }

    /// The span actually enforced; never below 2
    pub fn effective_min_span(&self) -> usize {
        self.min_span.max(2)
    }
}
