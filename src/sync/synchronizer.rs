use crate::export::ExportSnapshot;
use crate::interval::{Boundary, IntervalEditor, IntervalError};
use crate::plate::{heatmap, scatter, PlateHeatmap, ScatterPoint};
use crate::project::{Project, WellRecordId};
use crate::selection::{CurveSlot, SelectionError, SelectionSet};
use crate::well::{DisplayMode, WellRecord};

use super::events::{SelectionSource, UiEvent};
use super::views::{
    CurvePlot, DetailPanel, MultiPlot, MultiPlotCurve, Notice, TableRow, ViewUpdate,
};

/// Owns the project, the overlay selection and the current detail selection,
/// and turns UI events into ordered view updates.
#[derive(Debug, Clone)]
pub struct ViewSynchronizer {
    project: Project,
    selection: SelectionSet,
    editor: IntervalEditor,
    rows: Vec<WellRecordId>,
    current: Option<WellRecordId>,
    busy: bool,
}

impl ViewSynchronizer {
    /// Take ownership of a loaded project. The overlay is populated with the
    /// first non-Control record, which also becomes the current selection.
    pub fn new(project: Project, editor: IntervalEditor) -> Self {
        let rows: Vec<WellRecordId> = project.result_ids().collect();
        let mut selection = SelectionSet::new();
        selection.populate(&project);
        let current = project.first_result();

        log::debug!(
            "Synchronizer over {} plates, {} result rows",
            project.plates().len(),
            rows.len()
        );

        Self {
            project,
            selection,
            editor,
            rows,
            current,
            busy: false,
        }
    }

    /// Loaded project
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Give the project back, e.g. for saving
    pub fn into_project(self) -> Project {
        self.project
    }

    /// Overlay slots
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Editor used for every interval change
    pub fn editor(&self) -> &IntervalEditor {
        &self.editor
    }

    /// Record shown in the detail panel
    pub fn current(&self) -> Option<WellRecordId> {
        self.current
    }

    /// True while an export is running
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Clear the busy flag once the export worker has finished
    pub fn finish_export(&mut self) {
        if self.busy {
            log::info!("Export finished, edits enabled");
        }
        self.busy = false;
    }

    /// Map a view coordinate to a record id. Table rows, heatmap cells and
    /// scatter points for the same sample resolve to the same id.
    pub fn resolve(&self, source: SelectionSource) -> Option<WellRecordId> {
        let id = match source {
            SelectionSource::TableRow(row) => *self.rows.get(row)?,
            SelectionSource::HeatmapCell {
                plate_index,
                position,
            } => {
                let plate = self.project.plate(plate_index)?;
                WellRecordId::new(plate_index, plate.find_position(position)?)
            }
            SelectionSource::ScatterPoint { plate_index, point } => {
                WellRecordId::new(plate_index, point)
            }
            SelectionSource::Record(id) => id,
        };
        self.project.get(id).map(|_| id)
    }

    /// Apply one event and return the view updates in application order
    pub fn handle(&mut self, event: UiEvent) -> Vec<ViewUpdate> {
        if self.busy && event.mutates_records() {
            log::debug!("Rejected {:?} while exporting", event);
            return vec![ViewUpdate::Notice(Notice::Busy)];
        }

        match event {
            UiEvent::SelectionChanged(source) => self.select(source),
            UiEvent::BoundaryClicked { boundary, index } => self.move_boundary(boundary, index),
            UiEvent::BoundaryTimeClicked { boundary, time } => {
                let index = self
                    .current
                    .and_then(|id| self.project.get(id))
                    .map(|well| well.nearest_index(time));
                match index {
                    Some(index) => self.move_boundary(boundary, index),
                    None => vec![ViewUpdate::Notice(Notice::NoSelection)],
                }
            }
            UiEvent::FitToggled(enabled) => {
                self.mutate(|editor, well| editor.toggle_fit(well, enabled))
            }
            UiEvent::ManualToggled(manual) => {
                let Some(id) = self.current else {
                    return vec![ViewUpdate::Notice(Notice::NoSelection)];
                };
                if let Some(well) = self.project.get_mut(id) {
                    self.editor.toggle_manual_interval(well, manual);
                }
                self.detail_panel().map(ViewUpdate::DetailPanel).into_iter().collect()
            }
            UiEvent::DisplayModeChanged(mode) => self.change_display_mode(mode),
            UiEvent::CurveAdded { slot } => {
                let Some(id) = self.current else {
                    return vec![ViewUpdate::Notice(Notice::NoSelection)];
                };
                let result = match self.project.get(id) {
                    Some(well) => self.selection.add(slot, id, well).map(|_| ()),
                    None => return vec![ViewUpdate::Notice(Notice::NoSelection)],
                };
                self.overlay_result(result)
            }
            UiEvent::CurveRemoved { slot } => {
                let result = self.selection.remove(slot).map(|_| ());
                self.overlay_result(result)
            }
            UiEvent::CurveColorChanged { slot, color } => {
                let result = self.selection.set_color(slot, color);
                self.overlay_result(result)
            }
            UiEvent::CurveColorCycled { slot } => {
                let result = self.selection.cycle_color(slot).map(|_| ());
                self.overlay_result(result)
            }
            UiEvent::MultiNormalizedToggled => {
                self.selection.toggle_normalized();
                vec![ViewUpdate::MultiPlot(self.multi_plot())]
            }
            UiEvent::ExportRequested => {
                if self.busy {
                    return vec![ViewUpdate::Notice(Notice::Busy)];
                }
                self.busy = true;
                let snapshot = self.export_snapshot();
                log::info!("Export requested for {} plots, edits disabled", snapshot.len());
                vec![ViewUpdate::ExportReady(snapshot)]
            }
        }
    }

    /// Every view's current state, for the first render
    pub fn full_refresh(&self) -> Vec<ViewUpdate> {
        let mut updates: Vec<ViewUpdate> = self
            .results_table()
            .into_iter()
            .enumerate()
            .map(|(row, data)| ViewUpdate::TableRow { row, data })
            .collect();
        updates.extend(self.detail_panel().map(ViewUpdate::DetailPanel));
        updates.extend(self.detail_plot().map(ViewUpdate::DetailPlot));
        updates.push(ViewUpdate::MultiPlot(self.multi_plot()));
        for plate_index in 0..self.project.plates().len() {
            self.push_plate_views(plate_index, &mut updates);
        }
        updates
    }

    /// Rows of the results table, Control wells excluded
    pub fn results_table(&self) -> Vec<TableRow> {
        self.rows.iter().filter_map(|&id| self.table_row(id)).collect()
    }

    /// Table row contents for `id`
    pub fn table_row(&self, id: WellRecordId) -> Option<TableRow> {
        let well = self.project.get(id)?;
        Some(TableRow {
            id,
            plate_number: id.plate_number(),
            well_id: well.well_id().to_string(),
            sample_id: well.sample_id().to_string(),
            slope: well.fit().rate(),
            confidence: well.fit().uncertainty(),
        })
    }

    /// Detail panel state for the current record
    pub fn detail_panel(&self) -> Option<DetailPanel> {
        let id = self.current?;
        let well = self.project.get(id)?;
        let (start_time, stop_time) = well.interval_times();
        Some(DetailPanel {
            id,
            sample_id: well.sample_id().to_string(),
            well_id: well.well_id().to_string(),
            fit_enabled: well.fit_enabled(),
            manual_interval: well.manual_interval(),
            start_index: well.interval_start_index(),
            stop_index: well.interval_stop_index(),
            start_time,
            stop_time,
            display_mode: well.display_mode(),
            slope: well.fit().rate(),
            confidence: well.fit().uncertainty(),
            r_squared: well.fit().is_computed().then_some(well.fit().r_squared),
        })
    }

    /// Detail plot for the current record, in its display mode
    pub fn detail_plot(&self) -> Option<CurvePlot> {
        let well = self.project.get(self.current?)?;
        Some(record_plot(well))
    }

    /// Overlay of every occupied slot
    pub fn multi_plot(&self) -> MultiPlot {
        let mode = self.selection.display_mode();
        MultiPlot {
            mode,
            curves: self
                .selection
                .occupied()
                .map(|(slot, curve)| MultiPlotCurve {
                    slot,
                    color: curve.color,
                    plot: slot_plot(curve, mode),
                })
                .collect(),
        }
    }

    /// Heatmap of one plate
    pub fn heatmap(&self, plate_index: usize) -> Option<PlateHeatmap> {
        self.project.plate(plate_index).map(heatmap)
    }

    /// Scatter points of one plate
    pub fn scatter(&self, plate_index: usize) -> Option<Vec<ScatterPoint>> {
        self.project.plate(plate_index).map(scatter)
    }

    /// Read-only copy of every exportable record
    pub fn export_snapshot(&self) -> ExportSnapshot {
        ExportSnapshot::from_project(&self.project)
    }

    fn select(&mut self, source: SelectionSource) -> Vec<ViewUpdate> {
        let Some(id) = self.resolve(source) else {
            log::debug!("No record at {:?}", source);
            return vec![ViewUpdate::Notice(Notice::Unresolved(source))];
        };
        self.current = Some(id);

        let mut updates = Vec::new();
        updates.extend(self.detail_panel().map(ViewUpdate::DetailPanel));
        updates.extend(self.detail_plot().map(ViewUpdate::DetailPlot));
        if self.refresh_overlay(id) {
            updates.push(ViewUpdate::MultiPlot(self.multi_plot()));
        }
        updates
    }

    fn move_boundary(&mut self, boundary: Boundary, index: usize) -> Vec<ViewUpdate> {
        self.mutate(|editor, well| editor.set_boundary(well, boundary, index).map(|_| ()))
    }

    fn change_display_mode(&mut self, mode: DisplayMode) -> Vec<ViewUpdate> {
        let Some(well) = self.current.and_then(|id| self.project.get_mut(id)) else {
            return vec![ViewUpdate::Notice(Notice::NoSelection)];
        };
        well.set_display_mode(mode);

        let mut updates = Vec::new();
        updates.extend(self.detail_panel().map(ViewUpdate::DetailPanel));
        updates.extend(self.detail_plot().map(ViewUpdate::DetailPlot));
        updates
    }

    /// Run an edit on the current record, then propagate. A rejected edit
    /// leaves the record untouched and yields a single notice.
    fn mutate<F>(&mut self, edit: F) -> Vec<ViewUpdate>
    where
        F: FnOnce(&IntervalEditor, &mut WellRecord) -> Result<(), IntervalError>,
    {
        let Some(id) = self.current else {
            return vec![ViewUpdate::Notice(Notice::NoSelection)];
        };
        let Some(well) = self.project.get_mut(id) else {
            return vec![ViewUpdate::Notice(Notice::Unresolved(SelectionSource::Record(id)))];
        };
        if let Err(e) = edit(&self.editor, well) {
            log::info!("Edit on {} rejected: {}", id, e);
            return vec![ViewUpdate::Notice(Notice::Interval(e))];
        }
        self.propagate(id)
    }

    /// Updates after a record's fit changed: table row, detail panel and
    /// plot, overlay, then the plate summaries
    fn propagate(&mut self, id: WellRecordId) -> Vec<ViewUpdate> {
        let mut updates = Vec::new();

        if let Some(row) = self.rows.iter().position(|&r| r == id) {
            if let Some(data) = self.table_row(id) {
                updates.push(ViewUpdate::TableRow { row, data });
            }
        }
        if self.current == Some(id) {
            updates.extend(self.detail_panel().map(ViewUpdate::DetailPanel));
            updates.extend(self.detail_plot().map(ViewUpdate::DetailPlot));
        }
        if self.refresh_overlay(id) {
            updates.push(ViewUpdate::MultiPlot(self.multi_plot()));
        }
        self.push_plate_views(id.plate_index, &mut updates);
        updates
    }

    /// Re-snapshot every slot showing `id`; true when any slot did
    fn refresh_overlay(&mut self, id: WellRecordId) -> bool {
        match self.project.get(id) {
            Some(well) => !self.selection.refresh(id, well).is_empty(),
            None => false,
        }
    }

    fn overlay_result(&self, result: Result<(), SelectionError>) -> Vec<ViewUpdate> {
        match result {
            Ok(()) => vec![ViewUpdate::MultiPlot(self.multi_plot())],
            Err(e) => {
                log::info!("Overlay edit rejected: {}", e);
                vec![ViewUpdate::Notice(Notice::Selection(e))]
            }
        }
    }

    fn push_plate_views(&self, plate_index: usize, updates: &mut Vec<ViewUpdate>) {
        if let Some(heatmap) = self.heatmap(plate_index) {
            updates.push(ViewUpdate::Heatmap {
                plate_index,
                heatmap,
            });
        }
        if let Some(points) = self.scatter(plate_index) {
            updates.push(ViewUpdate::Scatter {
                plate_index,
                points,
            });
        }
    }
}

fn record_plot(well: &WellRecord) -> CurvePlot {
    let mode = well.display_mode();
    CurvePlot {
        sample_id: well.sample_id().to_string(),
        time: well.time_series().to_vec(),
        values: well.series_for(mode).into_owned(),
        fit_line: well.fit_line_for(mode),
        interval_times: well.fit_enabled().then(|| well.interval_times()),
    }
}

fn slot_plot(curve: &CurveSlot, mode: DisplayMode) -> CurvePlot {
    let markers = curve
        .fit_line
        .time
        .first()
        .copied()
        .zip(curve.fit_line.time.last().copied());
    CurvePlot {
        sample_id: curve.sample_id.clone(),
        time: curve.time.clone(),
        values: curve.values(mode),
        fit_line: curve.fit_line_for(mode),
        interval_times: markers,
    }
}
