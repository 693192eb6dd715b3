//! # Linear Fit Engine
//!
//! Ordinary least-squares regression of signal against time over an
//! inclusive index interval, plus automatic detection of the linear phase
//! of a reaction curve.
//!
//! ## Sentinels instead of errors
//!
//! Intervals holding fewer than two points do not raise: [`fit`] returns a
//! [`LinearFit`] whose numeric fields are NaN and whose status is
//! [`FitStatus::InsufficientPoints`]. With exactly two points slope and
//! intercept are exact but the confidence half-width is NaN, since a slope
//! standard error needs at least one residual degree of freedom.
//!
//! Only contract violations (mismatched series lengths, indices outside the
//! series) are reported through [`FitError`].
//!
//! ## Auto-interval heuristic
//!
//! [`detect_interval`] scans every window `[start, stop]` with
//! `stop - start >= min_span`, keeping only windows whose slope has the same
//! sign as the least-squares slope of the whole series and whose `r_squared`
//! reaches `min_r_squared`. Among those it picks the window whose fitted line
//! rises (or falls) the furthest, `|slope| * (t[stop] - t[start])`, so a long
//! flat plateau never outranks the steep initial phase. Ties go to the higher
//! `r_squared`, then the earlier start. If no window qualifies the whole
//! series is returned.
//!
//! ```rust
//! use platerate::fit::{fit, FitStatus};
//!
//! let time = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];
//! let signal = [100.0, 200.0, 300.0, 400.0, 500.0, 600.0];
//! let result = fit(&time, &signal, 0, 5)?;
//! assert_eq!(result.status, FitStatus::Computed);
//! assert!((result.slope - 10.0).abs() < 1e-12);
//! # Ok::<(), platerate::fit::FitError>(())
//! ```

mod auto_interval;
mod config;
mod error;
mod regression;
mod student_t;
mod types;


pub use auto_interval::detect_interval;
pub use config::FitConfig;
pub use error::FitError;
pub use regression::fit;
pub use student_t::{t_critical_95, CONFIDENCE_LEVEL};
pub use types::{FitInterval, FitLine, FitStatus, LinearFit};
