//! # platerate - Kinetic Rate Analysis for Multi-Well Plates
//!
//! `platerate` turns plate-reader time courses into enzymatic rates. Every
//! well gets a least-squares line over an automatically detected linear
//! window; the slope is the rate and a Student-t 95% half-width is its
//! uncertainty. Intervals can be edited by hand, results aggregate into
//! plate heatmaps and scatter plots, and up to eight curves can be overlaid
//! for comparison.
//!
//! ## Key Features
//!
//! - **Auto-interval fitting**: Among windows that reach the linearity
//!   threshold and follow the curve's overall direction, picks the one whose
//!   fitted line covers the largest signal change, `|slope| * (t[stop] -
//!   t[start])`; ties go to the better fit, then the earlier start.
//!
//! - **Interval editing**: Boundary edits that cross the opposite boundary
//!   swap the ends instead of failing; rejected edits leave the record
//!   untouched.
//!
//! - **Consistent views**: One synchronizer keeps the results table, detail
//!   panel, overlay plot, heatmap and scatter plot in step after every edit.
//!
//! - **Project archives**: A ZIP container with a JSON manifest and one CSV
//!   table per plate; fits are recomputed on load.
//!
//! - **Bulk plot export**: Renders one SVG per sample on a background thread
//!   while edits are locked out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platerate::interval::IntervalEditor;
//! use platerate::io::{save_project, write_results_file, PlateImporter};
//! use platerate::project::Project;
//!
//! let importer = PlateImporter::new(IntervalEditor::default());
//! let plate = importer.import_file("plate1.csv", Some("layout.csv".as_ref()))?;
//!
//! let mut project = Project::new();
//! project.add_plate(plate);
//!
//! save_project(&project, "assay.platerate")?;
//! write_results_file(&project, "rates.csv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Fitting a Single Series
//!
//! ```rust
//! use platerate::interval::IntervalEditor;
//! use platerate::well::WellRecord;
//!
//! let time = vec![0.0, 10.0, 20.0, 30.0, 40.0];
//! let signal = vec![100.0, 200.0, 300.0, 400.0, 500.0];
//! let mut well = WellRecord::new("A2", "Lysate 1", time, signal)?;
//!
//! IntervalEditor::default().initialize(&mut well)?;
//! assert!((well.fit_slope() - 10.0).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`fit`]: Linear regression, Student-t confidence and auto-interval detection
//! - [`well`]: Well records and display normalization
//! - [`interval`]: Boundary edits and fit toggles
//! - [`plate`]: Plate layouts, heatmaps, scatter data and control statistics
//! - [`project`]: Ownership of all plates and stable record ids
//! - [`selection`]: The eight-slot overlay selection set
//! - [`sync`]: Event handling and view propagation
//! - [`io`]: Plate CSV import, project archives and results tables
//! - [`export`]: Background SVG plot export
//!
//! ## Results Table
//!
//! | Column | Description |
//! |--------|-------------|
//! | Plate | 1-based plate number |
//! | Well | Plate coordinate, e.g. `B7` |
//! | Sample | Sample label from the layout |
//! | Rate | Slope in signal units per time unit, two decimals |
//! | CI95 | 95% confidence half-width of the slope, two decimals |
//!
//! Control wells are excluded; empty cells mean the value was not computed.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod export;
pub mod fit;
pub mod interval;
pub mod io;
pub mod plate;
pub mod project;
pub mod selection;
pub mod sync;
pub mod well;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::export::{BulkPlotExporter, ExportSnapshot, RenderConfig, SvgRenderer};
    pub use crate::fit::{FitConfig, FitInterval, FitStatus, LinearFit};
    pub use crate::interval::{Boundary, IntervalEditor, IntervalError};
    pub use crate::io::{load_project, save_project, write_results_file, PlateImporter};
    pub use crate::plate::{heatmap, reference_stats, scatter, Plate, PlateFormat};
    pub use crate::project::{Project, WellRecordId};
    pub use crate::selection::{CurveColor, SelectionSet, SLOT_COUNT};
    pub use crate::sync::{SelectionSource, UiEvent, ViewSynchronizer, ViewUpdate};
    pub use crate::well::{DisplayMode, WellRecord, CONTROL_SAMPLE_ID};
}
