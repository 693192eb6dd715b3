use std::path::Path;
use std::sync::{Arc, Mutex};

use super::*;
use crate::interval::IntervalEditor;
use crate::plate::{Plate, PlateFormat};
use crate::project::{Project, WellRecordId};
use crate::well::{WellRecord, CONTROL_SAMPLE_ID};

fn fitted(well_id: &str, sample_id: &str) -> WellRecord {
    let mut well = WellRecord::new(
        well_id,
        sample_id,
        vec![0.0, 10.0, 20.0, 30.0],
        vec![1.0, 3.0, 5.0, 7.0],
    )
    .unwrap();
    IntervalEditor::default().initialize(&mut well).unwrap();
    well
}

fn project() -> Project {
    let wells = vec![
        fitted("A1", CONTROL_SAMPLE_ID),
        fitted("A2", "Lys 1/a"),
        fitted("A3", "S2"),
        fitted("A4", "S2"),
        fitted("A5", "s2"),
    ];
    Project::from_plates(vec![Plate::new("P1", "p1.csv", PlateFormat::Wells96, wells)])
}

/// Renderer that records jobs instead of drawing
#[derive(Clone, Default)]
struct Recorder {
    rendered: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
}

impl PlotRenderer for Recorder {
    fn extension(&self) -> &str {
        "txt"
    }

    fn render(&self, job: &PlotJob, path: &Path) -> Result<(), ExportError> {
        if self.fail_on.as_deref() == Some(job.sample_id.as_str()) {
            return Err(ExportError::RenderError {
                path: path.to_path_buf(),
                message: "boom".to_string(),
            });
        }
        std::fs::write(path, &job.sample_id)?;
        self.rendered.lock().unwrap().push(job.file_stem.clone());
        Ok(())
    }
}

#[test]
fn test_snapshot_skips_controls_and_copies_fit() {
    let snapshot = ExportSnapshot::from_project(&project());
    assert_eq!(snapshot.len(), 4);

    let first = &snapshot.jobs()[0];
    assert_eq!(first.id, WellRecordId::new(0, 1));
    assert_eq!(first.plate_name, "P1");
    assert_eq!(first.interval_times, Some((0.0, 30.0)));
    assert!((first.slope.unwrap() - 0.2).abs() < 1e-12);
    assert_eq!(first.fit_line.time, vec![0.0, 30.0]);
}

#[test]
fn test_file_stems_are_sanitised_and_unique() {
    let snapshot = ExportSnapshot::from_project(&project());
    let stems: Vec<_> = snapshot.jobs().iter().map(|j| j.file_stem.as_str()).collect();
    assert_eq!(stems, vec!["Lys_1_a", "S2", "S2_2", "s2_3"]);
}

#[test]
fn test_sanitize_file_stem() {
    assert_eq!(sanitize_file_stem("  a b\\c  "), "a_b_c");
    assert_eq!(sanitize_file_stem("..hidden"), "hidden");
    assert_eq!(sanitize_file_stem("mix-1_v2.0"), "mix-1_v2.0");
}

#[test]
fn test_disabled_fit_has_no_interval_markers() {
    let mut project = project();
    let editor = IntervalEditor::default();
    let id = WellRecordId::new(0, 2);
    editor
        .toggle_fit(project.get_mut(id).unwrap(), false)
        .unwrap();

    let snapshot = ExportSnapshot::from_project(&project);
    let job = snapshot.jobs().iter().find(|j| j.id == id).unwrap();
    assert_eq!(job.interval_times, None);
    assert_eq!(job.slope, None);
    assert!(job.fit_line.is_empty());
}

#[test]
fn test_worker_reports_progress_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder::default();
    let snapshot = ExportSnapshot::from_project(&project());

    let exporter = BulkPlotExporter::spawn(snapshot, dir.path(), recorder.clone()).unwrap();
    assert_eq!(exporter.total(), 4);

    let progress: Vec<ExportProgress> = exporter.progress().iter().collect();
    let stats = exporter.finish().unwrap();

    assert_eq!(progress.len(), 4);
    assert_eq!(
        progress.iter().map(|p| p.completed).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert!(progress.iter().all(|p| p.total == 4));
    assert_eq!(progress[3].fraction(), 1.0);

    assert_eq!(stats.files_written, 4);
    assert_eq!(stats.total, 4);
    assert!(dir.path().join("S2_2.txt").exists());
    assert_eq!(std::fs::read_to_string(dir.path().join("s2_3.txt")).unwrap(), "s2");
    assert_eq!(recorder.rendered.lock().unwrap().len(), 4);
}

#[test]
fn test_worker_stops_on_first_error() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder {
        fail_on: Some("S2".to_string()),
        ..Recorder::default()
    };
    let snapshot = ExportSnapshot::from_project(&project());

    let exporter = BulkPlotExporter::spawn(snapshot, dir.path(), recorder.clone()).unwrap();
    let progress: Vec<ExportProgress> = exporter.progress().iter().collect();
    let err = exporter.finish().unwrap_err();

    assert!(matches!(err, ExportError::BackgroundExportError(ref m) if m.contains("boom")));
    assert_eq!(progress.len(), 1);
    assert_eq!(recorder.rendered.lock().unwrap().len(), 1);
}

#[test]
fn test_output_must_be_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    std::fs::write(&file, "x").unwrap();

    let result = BulkPlotExporter::spawn(ExportSnapshot::default(), &file, Recorder::default());
    assert!(matches!(result, Err(ExportError::NotADirectory(_))));
}

#[test]
fn test_empty_export() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested").join("plots");
    let exporter =
        BulkPlotExporter::spawn(ExportSnapshot::default(), &target, Recorder::default()).unwrap();
    let stats = exporter.finish().unwrap();

    assert_eq!(stats.files_written, 0);
    assert!(target.is_dir());
}

#[test]
fn test_svg_renderer_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = ExportSnapshot::from_project(&project());
    let renderer = SvgRenderer::new(RenderConfig::thumbnail());
    let path = dir.path().join("one.svg");

    renderer.render(&snapshot.jobs()[0], &path).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("width=\"320\""));
}

#[test]
fn test_render_config_from_toml() {
    let config: RenderConfig = toml::from_str("width = 1024\nshow_interval = false").unwrap();
    assert_eq!(config.width, 1024);
    assert_eq!(config.height, 500);
    assert!(!config.show_interval);
}
