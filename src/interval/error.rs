use crate::fit::FitError;

/// Errors raised by interval edits. All are user-correctable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntervalError {
    /// Start and stop would coincide
    #[error("Start and stop cannot both be at index {index}")]
    InvalidBoundary {
        /// Index already held by the opposite boundary
        index: usize,
    },

    /// The picked index lies outside the series
    #[error("Index {index} out of range for {len} points")]
    IndexOutOfRange {
        /// Picked index
        index: usize,
        /// Series length
        len: usize,
    },

    /// The fit engine rejected its inputs
    #[error("Fit error: {0}")]
    Fit(#[from] FitError),
}
