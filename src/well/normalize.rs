/// Min-max scaling parameters of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Smallest value of the series
    pub min: f64,
    /// Largest value of the series
    pub max: f64,
}

impl Normalization {
    /// Scaling that maps `values` onto [0, 1]
    pub fn of(values: &[f64]) -> Self {
        let (min, max) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            Self { min: 0.0, max: 0.0 }
        } else {
            Self { min, max }
        }
    }

    /// Rescale one value; a constant series maps to zero
    pub fn apply(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            (value - self.min) / range
        } else {
            0.0
        }
    }
}

/// Rescale `values` to [0, 1]
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let scale = Normalization::of(values);
    values.iter().map(|&v| scale.apply(v)).collect()
}
