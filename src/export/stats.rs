use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Statistics from a completed bulk export
#[derive(Debug, Clone)]
pub struct ExportStats {
    /// Plots requested
    pub total: usize,
    /// Image files written
    pub files_written: usize,
    /// Directory the files were written to
    pub output_dir: PathBuf,
    /// Paths of the written files, in job order
    pub files: Vec<PathBuf>,
    /// Wall time of the worker
    pub elapsed: Duration,
}

impl fmt::Display for ExportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} of {} plots to {} in {:.2}s",
            self.files_written,
            self.total,
            self.output_dir.display(),
            self.elapsed.as_secs_f64()
        )
    }
}
