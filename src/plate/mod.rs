//! # Plates and Plate Aggregation
//!
//! A [`Plate`] owns the well records of one physical plate. This module also
//! converts between 1-based well indices and plate coordinates, and derives
//! the heatmap and scatter summaries the review views draw.
//!
//! ## Coordinates
//!
//! Layout is row-major: index 1 is `A1`, index 12 is `A12` and index 13 is
//! `B1` on a 96-well plate (8 rows x 12 columns). A 384-well plate has 16
//! rows (`A`..`P`) and 24 columns.
//!
//! ```rust
//! use platerate::plate::{index_to_well, well_to_index, PlateFormat};
//!
//! let well = index_to_well(13, PlateFormat::Wells96)?;
//! assert_eq!(well, "B1");
//! assert_eq!(well_to_index(&well, PlateFormat::Wells96)?, 13);
//! # Ok::<(), platerate::plate::PlateError>(())
//! ```
//!
//! ## Missing data
//!
//! Positions with no well record map to a heatmap cell whose slope is NaN,
//! never zero, so views can draw them neutrally.

mod aggregate;
mod error;
mod format;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::{
    heatmap, reference_stats, scatter, HeatmapCell, PlateHeatmap, ReferenceStats, ScatterPoint,
};
pub use error::PlateError;
pub use format::{index_to_well, well_to_index, PlateFormat};
pub use types::Plate;
