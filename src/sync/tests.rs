use super::*;
use crate::interval::{Boundary, IntervalEditor, IntervalError};
use crate::plate::{Plate, PlateFormat};
use crate::project::{Project, WellRecordId};
use crate::selection::{palette_color, SelectionError};
use crate::well::{DisplayMode, WellRecord, CONTROL_SAMPLE_ID};

const TIME: [f64; 5] = [0.0, 10.0, 20.0, 30.0, 40.0];

fn well(well_id: &str, sample_id: &str, signal: [f64; 5]) -> WellRecord {
    let mut well = WellRecord::new(well_id, sample_id, TIME.to_vec(), signal.to_vec()).unwrap();
    IntervalEditor::default().initialize(&mut well).unwrap();
    well
}

/// A1 Control, A2 rising, B1 falling
fn synchronizer() -> ViewSynchronizer {
    let wells = vec![
        well("A1", CONTROL_SAMPLE_ID, [10.0, 11.0, 12.0, 13.0, 14.0]),
        well("A2", "S1", [100.0, 200.0, 300.0, 400.0, 500.0]),
        well("B1", "S2", [50.0, 45.0, 40.0, 35.0, 30.0]),
    ];
    let plate = Plate::new("P1", "p1.csv", PlateFormat::Wells96, wells);
    ViewSynchronizer::new(Project::from_plates(vec![plate]), IntervalEditor::default())
}

fn kinds(updates: &[ViewUpdate]) -> Vec<&'static str> {
    updates
        .iter()
        .map(|u| match u {
            ViewUpdate::TableRow { .. } => "table",
            ViewUpdate::DetailPanel(_) => "panel",
            ViewUpdate::DetailPlot(_) => "plot",
            ViewUpdate::MultiPlot(_) => "multi",
            ViewUpdate::Heatmap { .. } => "heatmap",
            ViewUpdate::Scatter { .. } => "scatter",
            ViewUpdate::ExportReady(_) => "export",
            ViewUpdate::Notice(_) => "notice",
        })
        .collect()
}

const A2: WellRecordId = WellRecordId {
    plate_index: 0,
    well_index: 1,
};
const B1: WellRecordId = WellRecordId {
    plate_index: 0,
    well_index: 2,
};

#[test]
fn test_initial_state() {
    let sync = synchronizer();
    assert_eq!(sync.current(), Some(A2));
    assert_eq!(sync.selection().occupied_count(), 1);
    assert!(!sync.is_busy());

    let table = sync.results_table();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].well_id, "A2");
    assert_eq!(table[0].slope_text(), "10.00");
    assert_eq!(table[1].slope_text(), "-0.50");
}

#[test]
fn test_all_views_resolve_to_same_record() {
    let sync = synchronizer();
    let from_table = sync.resolve(SelectionSource::TableRow(1));
    let from_heatmap = sync.resolve(SelectionSource::HeatmapCell {
        plate_index: 0,
        position: 13,
    });
    let from_scatter = sync.resolve(SelectionSource::ScatterPoint {
        plate_index: 0,
        point: 2,
    });

    assert_eq!(from_table, Some(B1));
    assert_eq!(from_heatmap, Some(B1));
    assert_eq!(from_scatter, Some(B1));
}

#[test]
fn test_unresolvable_sources() {
    let mut sync = synchronizer();
    let empty_cell = SelectionSource::HeatmapCell {
        plate_index: 0,
        position: 96,
    };
    assert_eq!(sync.resolve(empty_cell), None);
    assert_eq!(sync.resolve(SelectionSource::TableRow(2)), None);
    assert_eq!(
        sync.resolve(SelectionSource::ScatterPoint {
            plate_index: 1,
            point: 0
        }),
        None
    );

    let updates = sync.handle(UiEvent::SelectionChanged(empty_cell));
    assert_eq!(updates, vec![ViewUpdate::Notice(Notice::Unresolved(empty_cell))]);
    assert_eq!(sync.current(), Some(A2));
}

#[test]
fn test_selection_pushes_detail_state() {
    let mut sync = synchronizer();
    let updates = sync.handle(UiEvent::SelectionChanged(SelectionSource::TableRow(1)));
    assert_eq!(kinds(&updates), vec!["panel", "plot"]);
    assert_eq!(sync.current(), Some(B1));

    let ViewUpdate::DetailPanel(panel) = &updates[0] else {
        panic!("expected detail panel");
    };
    assert_eq!(panel.well_id, "B1");
    assert!(panel.fit_enabled);
    assert!(!panel.manual_interval);
    assert_eq!((panel.start_index, panel.stop_index), (0, 4));
    assert_eq!((panel.start_time, panel.stop_time), (0.0, 40.0));
    assert_eq!(panel.display_mode, DisplayMode::Raw);
}

#[test]
fn test_selecting_overlaid_record_refreshes_multiplot() {
    let mut sync = synchronizer();
    let updates = sync.handle(UiEvent::SelectionChanged(SelectionSource::Record(A2)));
    assert_eq!(kinds(&updates), vec!["panel", "plot", "multi"]);
}

#[test]
fn test_boundary_edit_update_order() {
    let mut sync = synchronizer();
    let updates = sync.handle(UiEvent::BoundaryClicked {
        boundary: Boundary::Stop,
        index: 2,
    });
    assert_eq!(
        kinds(&updates),
        vec!["table", "panel", "plot", "multi", "heatmap", "scatter"]
    );

    let ViewUpdate::TableRow { row, data } = &updates[0] else {
        panic!("expected table row");
    };
    assert_eq!(*row, 0);
    assert!((data.slope.unwrap() - 10.0).abs() < 1e-9);

    let ViewUpdate::MultiPlot(multi) = &updates[3] else {
        panic!("expected multi-plot");
    };
    assert_eq!(multi.curves[0].plot.fit_line.time, vec![0.0, 20.0]);
    assert_eq!(multi.curves[0].plot.interval_times, Some((0.0, 20.0)));

    let well = sync.project().get(A2).unwrap();
    assert!(well.manual_interval());
    assert_eq!(well.interval_stop_index(), 2);
}

#[test]
fn test_edit_outside_overlay_skips_multiplot() {
    let mut sync = synchronizer();
    sync.handle(UiEvent::SelectionChanged(SelectionSource::TableRow(1)));
    let updates = sync.handle(UiEvent::BoundaryClicked {
        boundary: Boundary::Start,
        index: 1,
    });
    assert_eq!(kinds(&updates), vec!["table", "panel", "plot", "heatmap", "scatter"]);

    let ViewUpdate::Heatmap { heatmap, .. } = &updates[3] else {
        panic!("expected heatmap");
    };
    assert!((heatmap.cell_at("B1").unwrap().slope + 0.5).abs() < 1e-9);
}

#[test]
fn test_invalid_boundary_is_a_notice_without_mutation() {
    let mut sync = synchronizer();
    let before = sync.project().get(A2).unwrap().fit().clone();

    let updates = sync.handle(UiEvent::BoundaryClicked {
        boundary: Boundary::Start,
        index: 4,
    });
    assert_eq!(
        updates,
        vec![ViewUpdate::Notice(Notice::Interval(
            IntervalError::InvalidBoundary { index: 4 }
        ))]
    );
    let well = sync.project().get(A2).unwrap();
    assert_eq!(well.fit(), &before);
    assert!(!well.manual_interval());
}

#[test]
fn test_boundary_time_click_snaps_to_sample() {
    let mut sync = synchronizer();
    sync.handle(UiEvent::BoundaryTimeClicked {
        boundary: Boundary::Stop,
        time: 29.0,
    });
    assert_eq!(sync.project().get(A2).unwrap().interval_stop_index(), 3);
}

#[test]
fn test_fit_toggle_blanks_table_cell() {
    let mut sync = synchronizer();
    let updates = sync.handle(UiEvent::FitToggled(false));

    let ViewUpdate::TableRow { data, .. } = &updates[0] else {
        panic!("expected table row");
    };
    assert_eq!(data.slope, None);
    assert_eq!(data.slope_text(), "");
    assert_eq!(data.confidence_text(), "");

    let ViewUpdate::DetailPlot(plot) = &updates[2] else {
        panic!("expected detail plot");
    };
    assert!(plot.fit_line.is_empty());
    assert_eq!(plot.interval_times, None);
}

#[test]
fn test_manual_toggle_updates_panel_only() {
    let mut sync = synchronizer();
    let updates = sync.handle(UiEvent::ManualToggled(true));
    assert_eq!(kinds(&updates), vec!["panel"]);
    assert!(sync.project().get(A2).unwrap().manual_interval());
}

#[test]
fn test_display_mode_change() {
    let mut sync = synchronizer();
    let updates = sync.handle(UiEvent::DisplayModeChanged(DisplayMode::Normalized));
    assert_eq!(kinds(&updates), vec!["panel", "plot"]);

    let ViewUpdate::DetailPlot(plot) = &updates[1] else {
        panic!("expected detail plot");
    };
    assert_eq!(plot.values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert!((plot.fit_line.values[1] - 1.0).abs() < 1e-9);
}

#[test]
fn test_overlay_edits() {
    let mut sync = synchronizer();
    sync.handle(UiEvent::SelectionChanged(SelectionSource::TableRow(1)));

    let updates = sync.handle(UiEvent::CurveAdded { slot: 3 });
    let ViewUpdate::MultiPlot(multi) = &updates[0] else {
        panic!("expected multi-plot");
    };
    assert_eq!(multi.curves.len(), 2);
    assert_eq!(multi.curves[1].slot, 3);
    assert_eq!(multi.curves[1].color, palette_color(3));

    let updates = sync.handle(UiEvent::CurveRemoved { slot: 0 });
    assert_eq!(kinds(&updates), vec!["multi"]);

    let updates = sync.handle(UiEvent::CurveRemoved { slot: 3 });
    assert_eq!(
        updates,
        vec![ViewUpdate::Notice(Notice::Selection(
            SelectionError::LastCurveProtected { slot: 3 }
        ))]
    );
    assert_eq!(sync.selection().occupied_count(), 1);
}

#[test]
fn test_overlay_normalized_toggle() {
    let mut sync = synchronizer();
    let updates = sync.handle(UiEvent::MultiNormalizedToggled);
    let ViewUpdate::MultiPlot(multi) = &updates[0] else {
        panic!("expected multi-plot");
    };
    assert_eq!(multi.mode, DisplayMode::Normalized);
    assert!(multi.curves[0]
        .plot
        .values
        .iter()
        .all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_export_sets_busy_flag() {
    let mut sync = synchronizer();
    let updates = sync.handle(UiEvent::ExportRequested);
    let ViewUpdate::ExportReady(snapshot) = &updates[0] else {
        panic!("expected export snapshot");
    };
    assert_eq!(snapshot.len(), 2);
    assert!(sync.is_busy());

    let edit = UiEvent::BoundaryClicked {
        boundary: Boundary::Stop,
        index: 2,
    };
    assert_eq!(sync.handle(edit.clone()), vec![ViewUpdate::Notice(Notice::Busy)]);
    assert_eq!(
        sync.handle(UiEvent::ExportRequested),
        vec![ViewUpdate::Notice(Notice::Busy)]
    );
    assert_eq!(sync.project().get(A2).unwrap().interval_stop_index(), 4);

    // Read-only events still work
    let updates = sync.handle(UiEvent::SelectionChanged(SelectionSource::TableRow(1)));
    assert_eq!(kinds(&updates), vec!["panel", "plot"]);

    sync.finish_export();
    sync.handle(UiEvent::SelectionChanged(SelectionSource::TableRow(0)));
    assert_eq!(kinds(&sync.handle(edit))[0], "table");
}

#[test]
fn test_no_selection_without_results() {
    let plate = Plate::new(
        "P1",
        "p1.csv",
        PlateFormat::Wells96,
        vec![well("A1", CONTROL_SAMPLE_ID, [1.0, 2.0, 3.0, 4.0, 5.0])],
    );
    let mut sync =
        ViewSynchronizer::new(Project::from_plates(vec![plate]), IntervalEditor::default());

    assert_eq!(sync.current(), None);
    assert_eq!(
        sync.handle(UiEvent::FitToggled(false)),
        vec![ViewUpdate::Notice(Notice::NoSelection)]
    );
    assert!(sync.results_table().is_empty());
    assert!(sync.multi_plot().curves.is_empty());
}

#[test]
fn test_full_refresh_covers_every_view() {
    let sync = synchronizer();
    let updates = sync.full_refresh();
    assert_eq!(
        kinds(&updates),
        vec!["table", "table", "panel", "plot", "multi", "heatmap", "scatter"]
    );
}
