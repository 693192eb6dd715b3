//! # Multi-Curve Selection Set
//!
//! Eight slots of curves overlaid for comparison. Each occupied slot holds a
//! snapshot of one well record's series and fit line, the record's
//! [`WellRecordId`](crate::project::WellRecordId) and a display colour.
//! Slots refer to records by id only; the view synchronizer refreshes the
//! snapshot whenever the referenced record's fit changes.
//!
//! Once populated, the set never becomes empty: removing the last occupied
//! slot fails with [`SelectionError::LastCurveProtected`].

mod error;
mod palette;
mod set;


pub use error::SelectionError;
pub use palette::{palette_color, CurveColor, PALETTE};
pub use set::{CurveSlot, SelectionSet, SLOT_COUNT};
