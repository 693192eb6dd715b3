//! # Well Record
//!
//! One reaction curve measured in one plate well: the raw time/signal
//! series, the fit interval and the fit outputs derived from it.
//!
//! Records are validated on construction (equal lengths, at least two
//! points, strictly increasing finite time, finite signal). Their fit state
//! is only changed through [`crate::interval::IntervalEditor`], which keeps
//! the interval, the fit numbers and the fit line consistent with each
//! other.

mod error;
mod normalize;
mod types;


pub use error::WellError;
pub use normalize::{normalize, Normalization};
pub use types::{DisplayMode, WellRecord, CONTROL_SAMPLE_ID};
