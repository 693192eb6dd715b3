//! TOML configuration file support.
//!
//! Fit and render settings can live in a config file instead of flags:
//!
//! ```toml
//! # platerate.toml
//! [fit]
//! min_span = 3
//! min_r_squared = 0.99
//!
//! [render]
//! width = 1200
//! height = 800
//! show_interval = true
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use platerate::export::RenderConfig;
use platerate::fit::FitConfig;

use super::profile::FitProfile;

/// Root configuration structure for platerate.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Auto-interval settings.
    #[serde(default)]
    pub fit: FitSection,

    /// Plot image settings.
    #[serde(default)]
    pub render: RenderSection,
}

/// `[fit]` table.
#[derive(Debug, Default, Deserialize)]
pub struct FitSection {
    /// Minimum interval span in steps.
    pub min_span: Option<usize>,

    /// Minimum R² for an auto-detected window.
    pub min_r_squared: Option<f64>,
}

/// `[render]` table.
#[derive(Debug, Default, Deserialize)]
pub struct RenderSection {
    /// Image width in pixels.
    pub width: Option<u32>,

    /// Image height in pixels.
    pub height: Option<u32>,

    /// Fit line stroke width.
    pub line_width: Option<u32>,

    /// Sample marker radius.
    pub point_size: Option<u32>,

    /// Draw interval boundary markers.
    pub show_interval: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Load `path` if given, otherwise the empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Fit settings: profile defaults, then file values.
    pub fn fit_config(&self, profile: FitProfile) -> FitConfig {
        let mut config = profile.fit_config();
        if let Some(min_span) = self.fit.min_span {
            config.min_span = min_span;
        }
        if let Some(min_r_squared) = self.fit.min_r_squared {
            config.min_r_squared = min_r_squared;
        }
        config
    }

    /// Render settings: defaults, then file values.
    pub fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::default();
        let section = &self.render;
        if let Some(width) = section.width {
            config.width = width;
        }
        if let Some(height) = section.height {
            config.height = height;
        }
        if let Some(line_width) = section.line_width {
            config.line_width = line_width;
        }
        if let Some(point_size) = section.point_size {
            config.point_size = point_size;
        }
        if let Some(show_interval) = section.show_interval {
            config.show_interval = show_interval;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [fit]
            min_span = 4
            min_r_squared = 0.95

            [render]
            width = 1200
            show_interval = false
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.fit.min_span, Some(4));
        assert_eq!(config.fit.min_r_squared, Some(0.95));
        assert_eq!(config.render.width, Some(1200));
        assert_eq!(config.render.height, None);

        let render = config.render_config();
        assert_eq!(render.width, 1200);
        assert_eq!(render.height, 500);
        assert!(!render.show_interval);
    }

    #[test]
    fn test_file_values_override_profile() {
        let config = Config::from_str("[fit]\nmin_r_squared = 0.9").unwrap();
        let fit = config.fit_config(FitProfile::Strict);
        assert_eq!(fit.min_span, 3);
        assert_eq!(fit.min_r_squared, 0.9);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.fit.min_span, None);
        assert_eq!(config.fit_config(FitProfile::Standard), FitConfig::default());
    }
}
