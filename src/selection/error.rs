/// Errors raised by selection set operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Slot index above 7
    #[error("Slot {slot} does not exist (slots 0-7)")]
    SlotOutOfRange {
        /// Requested slot
        slot: usize,
    },

    /// Removing this slot would leave no curve visible
    #[error("Slot {slot} holds the last curve and cannot be removed")]
    LastCurveProtected {
        /// Requested slot
        slot: usize,
    },

    /// The operation needs an occupied slot
    #[error("Slot {slot} is empty")]
    EmptySlot {
        /// Requested slot
        slot: usize,
    },

    /// A colour string could not be parsed
    #[error("Invalid colour '{0}', expected #rrggbb")]
    InvalidColor(String),
}
