//! # Interval Editor
//!
//! All mutations of a well's fit state go through [`IntervalEditor`]:
//! boundary selection, toggling the fit, toggling manual bounds, and the
//! initial auto-fit at import.
//!
//! ## Boundary semantics
//!
//! - Picking the index already held by the opposite boundary fails with
//!   [`IntervalError::InvalidBoundary`] and leaves the record untouched.
//! - Picking a start past the current stop (or a stop before the current
//!   start) swaps: the old opposite boundary becomes this boundary and the
//!   picked index becomes the opposite one, as when a handle is dragged past
//!   the other.
//! - Every successful edit pins the interval (`manual_interval = true`) and
//!   refits. A well with its fit disabled keeps the not-computed sentinel.
//!
//! Updates are atomic: the new interval and fit are computed first and then
//! stored together.

mod editor;
mod error;


pub use editor::{Boundary, EditOutcome, IntervalEditor};
pub use error::IntervalError;
