use crate::interval::Boundary;
use crate::project::WellRecordId;
use crate::selection::CurveColor;
use crate::well::DisplayMode;

/// Where a selection came from, in that view's own coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionSource {
    /// Row of the results table (Control wells are not listed)
    TableRow(usize),
    /// Heatmap cell at a 1-based plate position
    HeatmapCell {
        /// Plate shown by the heatmap
        plate_index: usize,
        /// 1-based row-major position
        position: usize,
    },
    /// Point of the per-plate scatter plot
    ScatterPoint {
        /// Plate shown by the scatter plot
        plate_index: usize,
        /// Point index, one point per record
        point: usize,
    },
    /// Direct id, e.g. from a multi-plot legend
    Record(WellRecordId),
}

/// User input handled by the synchronizer. Record-level events apply to the
/// currently selected record.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A view selected a record
    SelectionChanged(SelectionSource),
    /// A boundary was picked at a sample index
    BoundaryClicked {
        /// Boundary being moved
        boundary: Boundary,
        /// Picked sample index
        index: usize,
    },
    /// A boundary was picked on the plot at a time value
    BoundaryTimeClicked {
        /// Boundary being moved
        boundary: Boundary,
        /// Picked time in seconds, snapped to the nearest sample
        time: f64,
    },
    /// Fit checkbox changed
    FitToggled(bool),
    /// Manual-interval checkbox changed
    ManualToggled(bool),
    /// Detail view switched between raw and normalized signal
    DisplayModeChanged(DisplayMode),
    /// Current record placed into an overlay slot
    CurveAdded {
        /// Target slot
        slot: usize,
    },
    /// Overlay slot cleared
    CurveRemoved {
        /// Target slot
        slot: usize,
    },
    /// Overlay slot recoloured
    CurveColorChanged {
        /// Target slot
        slot: usize,
        /// New colour
        color: CurveColor,
    },
    /// Overlay slot advanced to the next palette colour
    CurveColorCycled {
        /// Target slot
        slot: usize,
    },
    /// Overlay switched between raw and normalized signal
    MultiNormalizedToggled,
    /// Bulk plot export requested
    ExportRequested,
}

impl UiEvent {
    /// Events that mutate well records and are refused during an export
    pub fn mutates_records(&self) -> bool {
        matches!(
            self,
            UiEvent::BoundaryClicked { .. }
                | UiEvent::BoundaryTimeClicked { .. }
                | UiEvent::FitToggled(_)
                | UiEvent::ManualToggled(_)
        )
    }
}
