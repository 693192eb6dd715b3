/// Errors raised by plate coordinate handling
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlateError {
    /// Well index outside `1..=format`
    #[error("Well index {index} out of range for a {wells}-well plate")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Plate well count
        wells: usize,
    },

    /// Coordinate is malformed or outside the plate
    #[error("Invalid well id '{well_id}' for a {wells}-well plate")]
    InvalidWellId {
        /// Offending coordinate
        well_id: String,
        /// Plate well count
        wells: usize,
    },

    /// Well count other than 96 or 384
    #[error("Unsupported plate format: {0} wells")]
    UnsupportedFormat(usize),
}
