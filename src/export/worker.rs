use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::error::ExportError;
use super::render::PlotRenderer;
use super::snapshot::{ExportSnapshot, PlotJob};
use super::stats::ExportStats;

/// Progress message sent after each written file
#[derive(Debug, Clone, PartialEq)]
pub struct ExportProgress {
    /// Files written so far
    pub completed: usize,
    /// Files requested
    pub total: usize,
    /// File just written
    pub path: PathBuf,
}

impl ExportProgress {
    /// Fraction done in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Renders an [`ExportSnapshot`] to image files on a background thread.
///
/// The worker owns its snapshot, so it never reads the live project. Progress
/// arrives on [`progress`](Self::progress) as one [`ExportProgress`] per file.
/// The first render failure stops the worker and is returned by
/// [`finish`](Self::finish).
///
/// Export cannot be cancelled once started.
///
/// If [`finish`](Self::finish) is not called, the destructor waits for the
/// thread and logs a warning.
pub struct BulkPlotExporter {
    progress: Receiver<ExportProgress>,
    handle: Option<JoinHandle<Result<ExportStats, String>>>,
    first_error: Arc<Mutex<Option<String>>>,
    total: usize,
}

impl BulkPlotExporter {
    /// Start exporting `snapshot` into `output_dir`, creating it if needed.
    ///
    /// The background thread is named `"platerate-export"`.
    pub fn spawn<R>(
        snapshot: ExportSnapshot,
        output_dir: impl Into<PathBuf>,
        renderer: R,
    ) -> Result<Self, ExportError>
    where
        R: PlotRenderer + 'static,
    {
        let output_dir = output_dir.into();
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(ExportError::NotADirectory(output_dir));
        }
        std::fs::create_dir_all(&output_dir)?;

        let total = snapshot.len();
        let jobs = snapshot.into_jobs();
        let (sender, receiver) = unbounded::<ExportProgress>();
        let first_error: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let first_error_clone = Arc::clone(&first_error);

        log::info!("Exporting {} plots to {}", total, output_dir.display());

        let handle = thread::Builder::new()
            .name("platerate-export".to_string())
            .spawn(move || {
                run_export(jobs, output_dir, renderer, sender).map_err(|e| {
                    let message = e.to_string();
                    if let Ok(mut slot) = first_error_clone.lock() {
                        *slot = Some(message.clone());
                    }
                    message
                })
            })
            .map_err(|e| {
                ExportError::BackgroundExportError(format!("Failed to spawn export thread: {}", e))
            })?;

        Ok(Self {
            progress: receiver,
            handle: Some(handle),
            first_error,
            total,
        })
    }

    /// Number of plots in this export
    pub fn total(&self) -> usize {
        self.total
    }

    /// Progress messages; the channel disconnects when the worker exits
    pub fn progress(&self) -> &Receiver<ExportProgress> {
        &self.progress
    }

    /// Check whether the worker has failed without waiting for it
    pub fn check_error(&self) -> Result<(), ExportError> {
        match self.first_error.lock() {
            Ok(slot) => match slot.as_ref() {
                Some(err) => Err(ExportError::BackgroundExportError(err.clone())),
                None => Ok(()),
            },
            Err(_) => Err(ExportError::ThreadPanicked),
        }
    }

    /// True once the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Wait for the worker and return its statistics
    pub fn finish(mut self) -> Result<ExportStats, ExportError> {
        let handle = self.handle.take().ok_or_else(|| {
            ExportError::BackgroundExportError("finish() called twice".to_string())
        })?;

        match handle.join() {
            Ok(Ok(stats)) => {
                log::info!("{}", stats);
                Ok(stats)
            }
            Ok(Err(err_str)) => Err(ExportError::BackgroundExportError(err_str)),
            Err(_panic) => Err(ExportError::ThreadPanicked),
        }
    }
}

impl Drop for BulkPlotExporter {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::warn!("BulkPlotExporter dropped without calling finish(); waiting for the worker");
            let _ = handle.join();
        }
    }
}

fn run_export<R: PlotRenderer>(
    jobs: Vec<PlotJob>,
    output_dir: PathBuf,
    renderer: R,
    progress: Sender<ExportProgress>,
) -> Result<ExportStats, ExportError> {
    let started = Instant::now();
    let total = jobs.len();
    let mut files = Vec::with_capacity(total);

    for job in &jobs {
        let path = output_dir.join(format!("{}.{}", job.file_stem, renderer.extension()));
        renderer.render(job, &path)?;
        log::debug!("Rendered {} ({}) to {}", job.sample_id, job.well_id, path.display());
        files.push(path.clone());

        // The receiver may be gone if nobody watches progress
        let _ = progress.send(ExportProgress {
            completed: files.len(),
            total,
            path,
        });
    }

    Ok(ExportStats {
        total,
        files_written: files.len(),
        output_dir,
        files,
        elapsed: started.elapsed(),
    })
}
