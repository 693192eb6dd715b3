//! Fit profiles for common assay conditions.
//!
//! Profiles pick the auto-interval settings so users do not need to know the
//! underlying thresholds.

use std::fmt;
use std::str::FromStr;

use platerate::fit::FitConfig;

/// Auto-interval profiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FitProfile {
    /// Accept only very straight segments.
    ///
    /// - Minimum span: 3 steps
    /// - Minimum R²: 0.995
    Strict,

    /// Default thresholds.
    ///
    /// - Minimum span: 2 steps
    /// - Minimum R²: 0.98
    #[default]
    Standard,

    /// Tolerate noisy curves.
    ///
    /// - Minimum span: 2 steps
    /// - Minimum R²: 0.9
    Lenient,
}

impl FitProfile {
    /// Fit settings for this profile.
    pub fn fit_config(&self) -> FitConfig {
        match self {
            FitProfile::Strict => FitConfig::strict(),
            FitProfile::Standard => FitConfig::default(),
            FitProfile::Lenient => FitConfig::lenient(),
        }
    }

    /// Returns all available profile names.
    pub fn variants() -> &'static [&'static str] {
        &["strict", "standard", "lenient"]
    }
}

impl fmt::Display for FitProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitProfile::Strict => write!(f, "strict"),
            FitProfile::Standard => write!(f, "standard"),
            FitProfile::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for FitProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(FitProfile::Strict),
            "standard" | "default" => Ok(FitProfile::Standard),
            "lenient" | "noisy" => Ok(FitProfile::Lenient),
            _ => Err(format!(
                "Unknown profile '{}'. Valid options: {}",
                s,
                FitProfile::variants().join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let standard = FitProfile::default();
        assert_eq!(standard, FitProfile::Standard);
        assert_eq!(standard.fit_config(), FitConfig::default());
        assert_eq!(FitProfile::Strict.fit_config().min_span, 3);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(FitProfile::from_str("strict").unwrap(), FitProfile::Strict);
        assert_eq!(FitProfile::from_str("DEFAULT").unwrap(), FitProfile::Standard);
        assert_eq!(FitProfile::from_str("noisy").unwrap(), FitProfile::Lenient);
        assert!(FitProfile::from_str("invalid").is_err());
    }
}
