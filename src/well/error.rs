/// Errors raised when a well record cannot be built from its series
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WellError {
    /// Time and signal series differ in length
    #[error("Well {well_id}: {time} time points but {signal} signal points")]
    LengthMismatch {
        /// Well coordinate
        well_id: String,
        /// Number of time points
        time: usize,
        /// Number of signal points
        signal: usize,
    },

    /// Fewer than two points were supplied
    #[error("Well {well_id}: need at least 2 points, got {len}")]
    TooFewPoints {
        /// Well coordinate
        well_id: String,
        /// Number of points supplied
        len: usize,
    },

    /// Time does not strictly increase at `index`
    #[error("Well {well_id}: time is not strictly increasing at index {index}")]
    NonIncreasingTime {
        /// Well coordinate
        well_id: String,
        /// First offending index
        index: usize,
    },

    /// A NaN or infinite value was found
    #[error("Well {well_id}: non-finite value at index {index}")]
    NonFinite {
        /// Well coordinate
        well_id: String,
        /// First offending index
        index: usize,
    },

    /// A stored interval does not satisfy `start < stop < len`
    #[error("Well {well_id}: invalid interval [{start}, {stop}] for {len} points")]
    InvalidInterval {
        /// Well coordinate
        well_id: String,
        /// Interval start
        start: usize,
        /// Interval stop
        stop: usize,
        /// Series length
        len: usize,
    },

    /// The well coordinate is blank
    #[error("Well id must not be empty")]
    EmptyWellId,
}
