use std::path::PathBuf;

/// Errors that can occur during bulk plot export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error while preparing the output directory
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The output path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A renderer failed to draw one plot
    #[error("Failed to render {path}: {message}")]
    RenderError {
        /// Output file being written
        path: PathBuf,
        /// Renderer message
        message: String,
    },

    /// Error from the background export thread
    #[error("Background export error: {0}")]
    BackgroundExportError(String),

    /// Background export thread panicked
    #[error("Background export thread panicked")]
    ThreadPanicked,
}
