use serde::Serialize;

use crate::export::ExportSnapshot;
use crate::fit::FitLine;
use crate::io::format_2dp;
use crate::interval::IntervalError;
use crate::plate::{PlateHeatmap, ScatterPoint};
use crate::project::WellRecordId;
use crate::selection::{CurveColor, SelectionError};
use crate::well::DisplayMode;

use super::events::SelectionSource;

/// One row of the results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Record shown in this row
    pub id: WellRecordId,
    /// 1-based plate number
    pub plate_number: usize,
    /// Plate coordinate
    pub well_id: String,
    /// Sample label
    pub sample_id: String,
    /// Rate, `None` when not computed
    pub slope: Option<f64>,
    /// 95% half-width, `None` when not estimable
    pub confidence: Option<f64>,
}

impl TableRow {
    /// Rate cell text
    pub fn slope_text(&self) -> String {
        format_2dp(self.slope)
    }

    /// Half-width cell text
    pub fn confidence_text(&self) -> String {
        format_2dp(self.confidence)
    }
}

/// State of the detail panel controls for the selected record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    /// Selected record
    pub id: WellRecordId,
    /// Sample label
    pub sample_id: String,
    /// Plate coordinate
    pub well_id: String,
    /// Fit checkbox
    pub fit_enabled: bool,
    /// Manual-interval checkbox
    pub manual_interval: bool,
    /// Interval start index
    pub start_index: usize,
    /// Interval stop index
    pub stop_index: usize,
    /// Interval start shown as a time value
    pub start_time: f64,
    /// Interval stop shown as a time value
    pub stop_time: f64,
    /// Raw or normalized signal
    pub display_mode: DisplayMode,
    /// Rate, `None` when not computed
    pub slope: Option<f64>,
    /// 95% half-width, `None` when not estimable
    pub confidence: Option<f64>,
    /// Coefficient of determination, `None` when not computed
    pub r_squared: Option<f64>,
}

/// Series and fit line of one curve, ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePlot {
    /// Legend label
    pub sample_id: String,
    /// Timestamps
    pub time: Vec<f64>,
    /// Signal in the plot's display mode
    pub values: Vec<f64>,
    /// Fit line, empty when the fit is disabled
    pub fit_line: FitLine,
    /// Interval boundary markers as time values
    pub interval_times: Option<(f64, f64)>,
}

/// One overlay curve with its slot and colour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiPlotCurve {
    /// Slot index, 0-7
    pub slot: usize,
    /// Line colour
    pub color: CurveColor,
    /// Curve data
    pub plot: CurvePlot,
}

/// Overlay of every occupied selection slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiPlot {
    /// Raw or normalized
    pub mode: DisplayMode,
    /// Curves in slot order
    pub curves: Vec<MultiPlotCurve>,
}

/// User-facing message for a recoverable condition
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// An interval edit was rejected; nothing changed
    Interval(IntervalError),
    /// A selection set edit was rejected; nothing changed
    Selection(SelectionError),
    /// A mutation was refused because an export is running
    Busy,
    /// The view coordinate does not map to a well record
    Unresolved(SelectionSource),
    /// The event needs a selected record and none is selected
    NoSelection,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Interval(e) => write!(f, "{e}"),
            Notice::Selection(e) => write!(f, "{e}"),
            Notice::Busy => write!(f, "An export is running; edits are disabled"),
            Notice::Unresolved(source) => write!(f, "No data at {source:?}"),
            Notice::NoSelection => write!(f, "No sample selected"),
        }
    }
}

/// One update a view must apply, emitted in the order views must apply them
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// Replace one results table row
    TableRow {
        /// Row index
        row: usize,
        /// New contents
        data: TableRow,
    },
    /// Replace the detail panel state
    DetailPanel(DetailPanel),
    /// Redraw the detail plot
    DetailPlot(CurvePlot),
    /// Redraw the overlay plot
    MultiPlot(MultiPlot),
    /// Redraw a plate heatmap
    Heatmap {
        /// Plate shown
        plate_index: usize,
        /// New cells
        heatmap: PlateHeatmap,
    },
    /// Redraw a plate scatter plot
    Scatter {
        /// Plate shown
        plate_index: usize,
        /// New points
        points: Vec<ScatterPoint>,
    },
    /// Read-only data for the export worker; the synchronizer is busy until
    /// [`ViewSynchronizer::finish_export`](super::ViewSynchronizer::finish_export)
    ExportReady(ExportSnapshot),
    /// Recoverable condition to show the user
    Notice(Notice),
}
