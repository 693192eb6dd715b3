use std::path::Path;

use plotters::prelude::*;

use super::config::RenderConfig;
use super::error::ExportError;
use super::snapshot::PlotJob;

/// Draws one plot job to a file. Implementations must be `Send` so the
/// export worker can own them.
pub trait PlotRenderer: Send {
    /// File extension without the dot
    fn extension(&self) -> &str;

    /// Render `job` to `path`
    fn render(&self, job: &PlotJob, path: &Path) -> Result<(), ExportError>;
}

/// SVG renderer: signal as markers, fit line and interval markers on top
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    /// Create a renderer with the given image settings
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Image settings
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl PlotRenderer for SvgRenderer {
    fn extension(&self) -> &str {
        "svg"
    }

    fn render(&self, job: &PlotJob, path: &Path) -> Result<(), ExportError> {
        draw_curve(job, path, &self.config).map_err(|e| ExportError::RenderError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

const SIGNAL_COLOR: RGBColor = RGBColor(31, 119, 180);
const FIT_COLOR: RGBColor = RGBColor(214, 39, 40);
const MARKER_COLOR: RGBColor = RGBColor(127, 127, 127);

/// Axis range covering `values`, padded by 5% and never zero-width
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad, hi + pad)
}

fn draw_curve(
    job: &PlotJob,
    path: &Path,
    config: &RenderConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = padded_range(job.time.iter().copied());
    let (y_min, y_max) = padded_range(
        job.signal
            .iter()
            .chain(job.fit_line.values.iter())
            .copied(),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(&job.sample_id, ("sans-serif", 20))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Signal")
        .draw()?;

    let radius = config.point_size;
    chart.draw_series(
        job.time
            .iter()
            .zip(job.signal.iter())
            .map(|(&t, &y)| Circle::new((t, y), radius, SIGNAL_COLOR.filled())),
    )?;

    if config.show_interval {
        if let Some((start, stop)) = job.interval_times {
            for t in [start, stop] {
                chart.draw_series(LineSeries::new(
                    [(t, y_min), (t, y_max)],
                    MARKER_COLOR.stroke_width(1),
                ))?;
            }
        }
    }

    if !job.fit_line.is_empty() {
        chart.draw_series(LineSeries::new(
            job.fit_line
                .time
                .iter()
                .copied()
                .zip(job.fit_line.values.iter().copied()),
            FIT_COLOR.stroke_width(config.line_width),
        ))?;
    }

    root.present()?;
    Ok(())
}
