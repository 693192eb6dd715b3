/// Errors raised when the fit engine is called outside its contract
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Time and signal series differ in length
    #[error("Series length mismatch: {time} time points, {signal} signal points")]
    LengthMismatch {
        /// Number of time points
        time: usize,
        /// Number of signal points
        signal: usize,
    },

    /// An interval bound lies outside the series
    #[error("Index {index} out of range for series of length {len}")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Series length
        len: usize,
    },
}
