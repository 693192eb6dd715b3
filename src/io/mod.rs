//! # Import, Persistence and Results Export
//!
//! File formats at the edge of the analysis core.
//!
//! ## Plate import
//!
//! A wide CSV with a header row: the first column holds time in seconds,
//! every other column one well, headed by its well id. An optional layout
//! CSV of `well_id,sample_id` pairs assigns sample ids; unassigned wells use
//! their well id. Every imported record is auto-fitted immediately.
//!
//! ```text
//! Time,A1,A2,B1
//! 0,0.10,0.12,0.11
//! 30,0.15,0.20,0.11
//! ```
//!
//! ## Project archive
//!
//! ```text
//! project.platerate (ZIP)
//! ├── mimetype               # "application/vnd.platerate+zip" (uncompressed, first entry)
//! ├── manifest.json          # version, save time, plate names and formats
//! └── plates/
//!     ├── plate_001.csv      # category,well_id,values... rows
//!     └── plate_002.csv
//! ```
//!
//! Plate tables hold one row per field category and well: `sample_id`,
//! `time`, `signal`, `interval`, `fit_enabled`, `manual_interval` and
//! `slope`. Rows of one record are contiguous, so two records sharing a
//! coordinate load back as two records. Loading refits every record over its stored interval; a stored
//! slope that disagrees with the refit is logged and replaced.
//!
//! ## Results table
//!
//! `Plate,Well,Sample,Rate,CI95` rows for every non-Control well, values
//! rounded to two decimals and left empty when not computed.

mod archive;
mod error;
mod import;
mod results;


pub use archive::{
    load_project, read_archive, read_manifest, save_project, write_archive, ArchiveManifest,
    PlateEntry, ARCHIVE_VERSION, PLATERATE_MIMETYPE,
};
pub use error::{ArchiveError, ImportError, ResultsError};
pub use import::{read_layout, read_layout_file, read_plate_data, Layout, PlateImporter, RawPlateData};
pub use results::{
    format_2dp, result_rows, results_tsv, write_results, write_results_file, ResultRow,
    RESULTS_HEADER,
};
