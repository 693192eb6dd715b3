//! End-to-end tests for platerate
//!
//! These tests drive the library the way the desktop front end and the CLI
//! do: import, fit, edit, aggregate, persist and export.

use platerate::export::{BulkPlotExporter, RenderConfig, SvgRenderer};
use platerate::fit::{fit, FitStatus};
use platerate::interval::{Boundary, EditOutcome, IntervalEditor, IntervalError};
use platerate::io::{load_project, save_project, write_results_file, PlateImporter};
use platerate::plate::{heatmap, reference_stats, Plate, PlateFormat};
use platerate::project::{Project, WellRecordId};
use platerate::sync::{SelectionSource, UiEvent, ViewSynchronizer, ViewUpdate};
use platerate::well::{WellRecord, CONTROL_SAMPLE_ID};
use std::fs;
use tempfile::tempdir;

const TIME: [f64; 6] = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];
const LINEAR: [f64; 6] = [100.0, 200.0, 300.0, 400.0, 500.0, 600.0];

fn linear_well() -> WellRecord {
    let mut well = WellRecord::new("A2", "S1", TIME.to_vec(), LINEAR.to_vec()).unwrap();
    IntervalEditor::default().initialize(&mut well).unwrap();
    well
}

/// Perfectly linear series fitted over the full interval
#[test]
fn test_scenario_a_full_interval_fit() {
    let result = fit(&TIME, &LINEAR, 0, 5).unwrap();
    assert_eq!(result.status, FitStatus::Computed);
    assert!((result.slope - 10.0).abs() < 1e-9);
    assert!((result.intercept - 100.0).abs() < 1e-9);
    assert!(result.confidence_halfwidth.abs() < 1e-6);

    // Auto-fit on import lands on the same full interval
    let well = linear_well();
    assert_eq!(well.interval_start_index(), 0);
    assert_eq!(well.interval_stop_index(), 5);
    assert!((well.fit_slope() - 10.0).abs() < 1e-9);
}

/// Moving the start past the stop swaps the boundaries
#[test]
fn test_scenario_b_boundary_swap() {
    let editor = IntervalEditor::default();
    let mut well = linear_well();

    let outcome = editor.set_stop(&mut well, 2).unwrap();
    assert!(matches!(outcome, EditOutcome::Moved(_)));
    assert_eq!(well.interval_stop_index(), 2);

    let outcome = editor.set_start(&mut well, 4).unwrap();
    assert!(matches!(outcome, EditOutcome::Swapped(_)));
    assert_eq!(well.interval_start_index(), 2);
    assert_eq!(well.interval_stop_index(), 4);
    assert!(well.manual_interval());
    assert!((well.fit_slope() - 10.0).abs() < 1e-9);

    // Landing on the opposite boundary is rejected and changes nothing
    let before = well.fit().clone();
    let err = editor.set_start(&mut well, 4).unwrap_err();
    assert!(matches!(err, IntervalError::InvalidBoundary { index: 4 }));
    assert_eq!(well.interval_start_index(), 2);
    assert_eq!(well.fit(), &before);
}

/// Unoccupied positions map to the no-data sentinel, not zero
#[test]
fn test_scenario_c_unoccupied_heatmap_cell() {
    let wells = (1..=5)
        .map(|column| {
            let mut well =
                WellRecord::new(format!("A{column}"), "S", TIME.to_vec(), LINEAR.to_vec())
                    .unwrap();
            IntervalEditor::default().initialize(&mut well).unwrap();
            well
        })
        .collect();
    let plate = Plate::new("P1", "p1.csv", PlateFormat::Wells96, wells);
    let map = heatmap(&plate);

    assert_eq!(map.cells.len(), 96);
    let b1 = map.cell_at("B1").unwrap();
    assert!(!b1.has_record());
    assert!(!b1.has_value());
    assert!(b1.slope.is_nan());
    assert!(b1.sample_id.is_none());

    let a3 = map.cell_at("A3").unwrap();
    assert!(a3.has_value());
    assert!((a3.slope - 10.0).abs() < 1e-9);
    assert_eq!(map.cells.iter().filter(|c| c.has_value()).count(), 5);
}

/// Disabling the fit blanks every output regardless of the prior value
#[test]
fn test_disabled_fit_sentinel() {
    let editor = IntervalEditor::default();
    let mut well = linear_well();
    editor.toggle_fit(&mut well, false).unwrap();

    assert!(!well.fit_enabled());
    assert!(well.fit_slope().is_nan());
    assert!(well.fit_confidence_halfwidth().is_nan());
    assert!(well.fit_line().is_empty());
    assert_eq!(well.fit().status, FitStatus::NotComputed);

    editor.toggle_fit(&mut well, true).unwrap();
    assert!((well.fit_slope() - 10.0).abs() < 1e-9);
}

const PLATE_CSV: &str = "\
Time,A1,A2,A3,B1
0,10,100,0,50
60,10,160,0,44
120,11,220,0,38
180,11,280,0,32
240,12,300,0,30
300,12,305,0,29
";

const LAYOUT_CSV: &str = "\
well_id,sample_id
A1,Control
A2,Lysate 1
A3,Blank
B1,Lysate 1
";

/// Import from disk, edit through the synchronizer, save, reload, export
#[test]
fn test_full_workflow() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("plate1.csv");
    let layout_path = dir.path().join("layout.csv");
    fs::write(&data_path, PLATE_CSV).unwrap();
    fs::write(&layout_path, LAYOUT_CSV).unwrap();

    let importer = PlateImporter::new(IntervalEditor::default());
    let plate = importer
        .import_file(&data_path, Some(layout_path.as_path()))
        .unwrap();
    assert_eq!(plate.name, "plate1");
    assert_eq!(plate.source_file, "plate1.csv");
    assert_eq!(plate.well(0).unwrap().sample_id(), CONTROL_SAMPLE_ID);

    let stats = reference_stats(&plate);
    assert_eq!(stats.count, 1);
    assert!(stats.std_dev.is_nan());

    let mut project = Project::new();
    project.add_plate(plate);

    // Pin A2 to its first four points through the event layer
    let a2 = WellRecordId::new(0, 1);
    let mut sync = ViewSynchronizer::new(project, IntervalEditor::default());
    assert_eq!(sync.current(), Some(a2));
    for event in [
        UiEvent::SelectionChanged(SelectionSource::HeatmapCell {
            plate_index: 0,
            position: 2,
        }),
        UiEvent::BoundaryClicked {
            boundary: Boundary::Start,
            index: 0,
        },
        UiEvent::BoundaryClicked {
            boundary: Boundary::Stop,
            index: 3,
        },
    ] {
        let updates = sync.handle(event);
        assert!(!updates.iter().any(|u| matches!(u, ViewUpdate::Notice(_))));
    }
    let edited_slope = sync.project().get(a2).unwrap().fit_slope();
    assert!((edited_slope - 1.0).abs() < 1e-9);

    let archive = dir.path().join("assay.platerate");
    let project = sync.into_project();
    save_project(&project, &archive).unwrap();

    let reloaded = load_project(&archive, &IntervalEditor::default()).unwrap();
    let well = reloaded.get(a2).unwrap();
    assert!(well.manual_interval());
    assert_eq!(well.interval_stop_index(), 3);
    assert_eq!(well.fit_slope().to_bits(), edited_slope.to_bits());

    let results = dir.path().join("rates.csv");
    let rows = write_results_file(&reloaded, &results).unwrap();
    assert_eq!(rows, 3);
    let text = fs::read_to_string(&results).unwrap();
    assert!(text.starts_with("Plate,Well,Sample,Rate,CI95\n"));
    assert!(text.contains("1,A2,Lysate 1,1.00,0.00\n"));
    assert!(!text.contains("Control"));

    // Export runs under the busy flag and names duplicates uniquely
    let mut sync = ViewSynchronizer::new(reloaded, IntervalEditor::default());
    let snapshot = sync
        .handle(UiEvent::ExportRequested)
        .into_iter()
        .find_map(|u| match u {
            ViewUpdate::ExportReady(snapshot) => Some(snapshot),
            _ => None,
        })
        .unwrap();
    assert!(sync.is_busy());
    let refused = sync.handle(UiEvent::FitToggled(false));
    assert!(matches!(refused.as_slice(), [ViewUpdate::Notice(_)]));

    let plots = dir.path().join("plots");
    let exporter =
        BulkPlotExporter::spawn(snapshot, &plots, SvgRenderer::new(RenderConfig::thumbnail()))
            .unwrap();
    let stats = exporter.finish().unwrap();
    sync.finish_export();
    assert!(!sync.is_busy());

    assert_eq!(stats.files_written, 3);
    for name in ["Lysate_1.svg", "Blank.svg", "Lysate_1_2.svg"] {
        let svg = fs::read_to_string(plots.join(name)).unwrap();
        assert!(svg.contains("<svg"), "{name}");
    }
}
