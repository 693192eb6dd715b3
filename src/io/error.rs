use crate::interval::IntervalError;
use crate::plate::PlateError;
use crate::well::WellError;

/// Errors raised while importing raw plate data
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// I/O error while opening an input file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV parser
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// The file does not have the expected structure
    #[error("File format mismatch: {0}")]
    Mismatch(String),

    /// A column could not be turned into a well record
    #[error("Well error: {0}")]
    WellError(#[from] WellError),

    /// The initial fit failed
    #[error("Fit error: {0}")]
    IntervalError(#[from] IntervalError),

    /// The plate has more wells than any supported layout
    #[error("Plate error: {0}")]
    PlateError(#[from] PlateError),
}

/// Errors raised while reading or writing project archives
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV reader or writer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error serializing/deserializing the manifest
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Error from the ZIP container library
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// The archive is not a platerate project
    #[error("Not a platerate archive (mimetype '{0}')")]
    InvalidMimetype(String),

    /// The manifest declares a format version this build cannot read
    #[error("Unsupported archive version {0}")]
    UnsupportedVersion(u32),

    /// A plate table is malformed
    #[error("Malformed entry {entry}: {message}")]
    Malformed {
        /// Archive entry name
        entry: String,
        /// What is wrong
        message: String,
    },

    /// A stored record failed validation
    #[error("Well error: {0}")]
    WellError(#[from] WellError),

    /// Refitting a stored record failed
    #[error("Fit error: {0}")]
    IntervalError(#[from] IntervalError),
}

/// Errors raised while writing the results table
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV writer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Clipboard text was not valid UTF-8
    #[error("Encoding error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}
