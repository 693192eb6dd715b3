//! # Bulk Plot Export
//!
//! Writes one image per non-Control well, named by sample id, on a
//! background thread so the caller stays responsive.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   ExportSnapshot (moved)   ┌──────────────────┐
//! │ ViewSynchronizer │ ─────────────────────────▶ │ platerate-export │
//! │   (busy flag)    │ ◀───ExportProgress──────── │  thread          │
//! └──────────────────┘     crossbeam channel      └──────────────────┘
//! ```
//!
//! The worker only sees the snapshot, a plain copy of each well's series and
//! fit line, so it never shares state with the interactive side.
//!
//! ## File names
//!
//! Sample ids are sanitised for the file system; repeated ids get `_2`,
//! `_3`, ... suffixes in export order.
//!
//! ## Limitations
//!
//! An export cannot be cancelled once started.
//!
//! ```rust,ignore
//! use platerate::export::{BulkPlotExporter, ExportSnapshot, RenderConfig, SvgRenderer};
//!
//! let snapshot = ExportSnapshot::from_project(&project);
//! let exporter = BulkPlotExporter::spawn(snapshot, "plots", SvgRenderer::new(RenderConfig::default()))?;
//! for p in exporter.progress().iter() {
//!     println!("{}/{}", p.completed, p.total);
//! }
//! let stats = exporter.finish()?;
//! ```

mod config;
mod error;
mod render;
mod snapshot;
mod stats;
mod worker;

#[cfg(test)]
mod tests;

pub use config::RenderConfig;
pub use error::ExportError;
pub use render::{PlotRenderer, SvgRenderer};
pub use snapshot::{sanitize_file_stem, ExportSnapshot, PlotJob};
pub use stats::ExportStats;
pub use worker::{BulkPlotExporter, ExportProgress};
