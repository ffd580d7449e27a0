//! Analysis configuration: one parameterized policy composed from the
//! per-package tunables, loadable from a TOML file.
//!
//! Every field carries a serde default, so a partial file that only
//! overrides a handful of values is valid.

use std::path::Path;

use route_safety_geometry::SpeedPolicy;
use route_safety_report::VehicleConfig;
use route_safety_risk::RiskConfig;
use route_safety_traffic::TrafficConfig;
use serde::{Deserialize, Serialize};

/// Errors that can occur while loading an analysis configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Densification tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DensifyConfig {
    /// Target interpolation density along the route.
    pub points_per_km: f64,
}

impl Default for DensifyConfig {
    fn default() -> Self {
        Self { points_per_km: 10.0 }
    }
}

/// The complete set of recognized analysis options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    /// Vehicle parameters echoed into the report.
    pub vehicle: VehicleConfig,
    /// Densification tunables.
    pub densify: DensifyConfig,
    /// Turn-angle speed policy.
    pub speed: SpeedPolicy,
    /// Traffic simulation tunables.
    pub traffic: TrafficConfig,
    /// Risk scoring tunables.
    pub risk: RiskConfig,
}

impl AnalysisConfig {
    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or does not
    /// parse against this schema.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: AnalysisConfig = toml::from_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: AnalysisConfig = toml::from_str(
            "[densify]\n\
             pointsPerKm = 4.0\n\
             \n\
             [risk]\n\
             hazardProbability = 0.0\n",
        )
        .unwrap();

        assert!((config.densify.points_per_km - 4.0).abs() < f64::EPSILON);
        assert!(config.risk.hazard_probability.abs() < f64::EPSILON);
        // Untouched sections keep their defaults.
        assert_eq!(config.speed, SpeedPolicy::default());
        assert_eq!(config.traffic, TrafficConfig::default());
    }

    #[test]
    fn unknown_file_is_an_io_error() {
        let err = AnalysisConfig::from_toml_path(Path::new("/nonexistent/config.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result: Result<AnalysisConfig, _> = toml::from_str("vehicle = 3");
        assert!(result.is_err());
    }
}
