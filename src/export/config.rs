use serde::Deserialize;

/// Image settings for rendered plots
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Stroke width of the fit line
    pub line_width: u32,
    /// Radius of the sample markers
    pub point_size: u32,
    /// Draw the interval boundary markers
    pub show_interval: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            line_width: 2,
            point_size: 3,
            show_interval: true,
        }
    }
}

impl RenderConfig {
    /// Small thumbnails for plate overviews
    pub fn thumbnail() -> Self {
        Self {
            width: 320,
            height: 200,
            line_width: 1,
            point_size: 2,
            show_interval: false,
        }
    }
}
