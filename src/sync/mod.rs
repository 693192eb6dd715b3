//! # View Synchronizer
//!
//! Keeps every view of the rate assay consistent with the project data.
//! User input arrives as a [`UiEvent`]; [`ViewSynchronizer::handle`] applies
//! it synchronously and returns the [`ViewUpdate`]s the views must apply,
//! in order:
//!
//! ```text
//! data mutation -> table row -> detail panel -> detail plot -> multi-plot -> heatmap -> scatter
//! ```
//!
//! No update is emitted before the mutation that triggered it has been
//! stored, so no view can observe an older state.
//!
//! Recoverable problems (identical boundaries, removing the last overlay
//! curve, editing during an export) come back as [`ViewUpdate::Notice`]
//! rather than as errors.
//!
//! ## Selection
//!
//! A table row, a heatmap cell and a scatter point all resolve to the same
//! [`WellRecordId`](crate::project::WellRecordId) for the same sample; see
//! [`ViewSynchronizer::resolve`].

mod events;
mod synchronizer;
mod views;

#[cfg(test)]
mod tests;

pub use events::{SelectionSource, UiEvent};
pub use synchronizer::ViewSynchronizer;
pub use views::{CurvePlot, DetailPanel, MultiPlot, MultiPlotCurve, Notice, TableRow, ViewUpdate};
