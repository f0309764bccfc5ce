#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! TOML configuration for the coastwatch core.
//!
//! The core components never read files or environment variables; they are
//! constructed from the values in [`CoreConfig`]. A default configuration
//! covering the Indian coastline is baked into the binary via
//! [`include_str!`] and returned by [`default_config`]. Every section has
//! serde defaults, so a config file only needs the keys it overrides.

use std::collections::BTreeMap;
use std::path::Path;

use coastwatch_hazard_models::HazardType;
use serde::Deserialize;

/// Default config embedded at compile time.
const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value parsed but is out of its allowed range.
    #[error("Invalid config value for {field}: {message}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// Description of what went wrong.
        message: String,
    },
}

/// Complete configuration for the scoring and clustering core.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoreConfig {
    /// Corroboration search parameters.
    #[serde(default)]
    pub corroboration: CorroborationConfig,
    /// Hotspot clustering parameters.
    #[serde(default)]
    pub clustering: ClusteringConfig,
    /// Accepted submission area.
    #[serde(default)]
    pub service_area: ServiceAreaConfig,
    /// Per-hazard priority weights. Hazards absent from the table score
    /// with a weight of 1.0.
    #[serde(default = "default_hazard_weights")]
    pub hazard_weights: BTreeMap<HazardType, f64>,
    /// Dashboard aggregation parameters.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            corroboration: CorroborationConfig::default(),
            clustering: ClusteringConfig::default(),
            service_area: ServiceAreaConfig::default(),
            hazard_weights: default_hazard_weights(),
            dashboard: DashboardConfig::default(),
        }
    }
}

/// How far and how far back to look for corroborating reports.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CorroborationConfig {
    /// Search radius in kilometers.
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    /// Maximum age of a corroborating report in hours.
    #[serde(default = "default_window_hours")]
    pub max_age_hours: i64,
}

impl Default for CorroborationConfig {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
            max_age_hours: default_window_hours(),
        }
    }
}

/// Grid clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ClusteringConfig {
    /// Grid cell size in degrees (0.1 is roughly 11 km).
    #[serde(default = "default_grid_resolution")]
    pub grid_resolution_deg: f64,
    /// Only reports newer than this many hours are clustered.
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,
    /// Minimum reports for a cell to become a hotspot.
    #[serde(default = "default_min_reports")]
    pub min_reports: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            grid_resolution_deg: default_grid_resolution(),
            window_hours: default_window_hours(),
            min_reports: default_min_reports(),
        }
    }
}

/// Inclusive bounding box submissions must fall inside.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ServiceAreaConfig {
    /// Southern bound.
    pub min_lat: f64,
    /// Northern bound.
    pub max_lat: f64,
    /// Western bound.
    pub min_lon: f64,
    /// Eastern bound.
    pub max_lon: f64,
}

impl Default for ServiceAreaConfig {
    /// Indian coastline, from the southern tip to the Gujarat coast.
    fn default() -> Self {
        Self {
            min_lat: 8.0,
            max_lat: 23.5,
            min_lon: 68.0,
            max_lon: 97.5,
        }
    }
}

/// Dashboard aggregation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DashboardConfig {
    /// Reports newer than this many hours count as active.
    #[serde(default = "default_window_hours")]
    pub active_window_hours: i64,
    /// Priority score at or above which a report is a high-priority alert.
    #[serde(default = "default_high_priority_threshold")]
    pub high_priority_threshold: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            active_window_hours: default_window_hours(),
            high_priority_threshold: default_high_priority_threshold(),
        }
    }
}

const fn default_radius_km() -> f64 {
    5.0
}

const fn default_window_hours() -> i64 {
    24
}

const fn default_grid_resolution() -> f64 {
    0.1
}

const fn default_min_reports() -> usize {
    3
}

const fn default_high_priority_threshold() -> f64 {
    4.0
}

fn default_hazard_weights() -> BTreeMap<HazardType, f64> {
    HazardType::all()
        .iter()
        .map(|hazard| (*hazard, hazard.default_weight()))
        .collect()
}

impl CoreConfig {
    /// Checks every value is within its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let corroboration = &self.corroboration;
        if !(corroboration.radius_km.is_finite() && corroboration.radius_km > 0.0) {
            return Err(invalid(
                "corroboration.radius_km",
                format!("must be positive, got {}", corroboration.radius_km),
            ));
        }
        if corroboration.max_age_hours <= 0 {
            return Err(invalid(
                "corroboration.max_age_hours",
                format!("must be positive, got {}", corroboration.max_age_hours),
            ));
        }

        let clustering = &self.clustering;
        if !(clustering.grid_resolution_deg.is_finite() && clustering.grid_resolution_deg > 0.0) {
            return Err(invalid(
                "clustering.grid_resolution_deg",
                format!("must be positive, got {}", clustering.grid_resolution_deg),
            ));
        }
        if clustering.window_hours <= 0 {
            return Err(invalid(
                "clustering.window_hours",
                format!("must be positive, got {}", clustering.window_hours),
            ));
        }
        if clustering.min_reports == 0 {
            return Err(invalid("clustering.min_reports", "must be at least 1".into()));
        }

        let area = &self.service_area;
        let lat_ok = |v: f64| (-90.0..=90.0).contains(&v);
        let lon_ok = |v: f64| (-180.0..=180.0).contains(&v);
        if !(lat_ok(area.min_lat) && lat_ok(area.max_lat) && area.min_lat <= area.max_lat) {
            return Err(invalid(
                "service_area",
                format!(
                    "latitude bounds {}..{} are inverted or out of range",
                    area.min_lat, area.max_lat
                ),
            ));
        }
        if !(lon_ok(area.min_lon) && lon_ok(area.max_lon) && area.min_lon <= area.max_lon) {
            return Err(invalid(
                "service_area",
                format!(
                    "longitude bounds {}..{} are inverted or out of range",
                    area.min_lon, area.max_lon
                ),
            ));
        }

        for (hazard, weight) in &self.hazard_weights {
            if !(weight.is_finite() && *weight >= 1.0) {
                return Err(invalid(
                    "hazard_weights",
                    format!("weight for {hazard} must be at least 1.0, got {weight}"),
                ));
            }
        }

        let dashboard = &self.dashboard;
        if dashboard.active_window_hours <= 0 {
            return Err(invalid(
                "dashboard.active_window_hours",
                format!("must be positive, got {}", dashboard.active_window_hours),
            ));
        }
        if !dashboard.high_priority_threshold.is_finite() {
            return Err(invalid(
                "dashboard.high_priority_threshold",
                "must be finite".into(),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, message: String) -> ConfigError {
    ConfigError::Invalid { field, message }
}

/// Parses and validates a TOML config string.
///
/// # Errors
///
/// Returns [`ConfigError`] if the TOML is malformed or a value is out of
/// range.
pub fn parse_config_toml(toml_str: &str) -> Result<CoreConfig, ConfigError> {
    let config: CoreConfig = toml::de::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses and validates a TOML config file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, is malformed, or
/// contains out-of-range values.
pub fn load_config(path: &Path) -> Result<CoreConfig, ConfigError> {
    log::debug!("Loading config from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    parse_config_toml(&contents)
}

/// Returns the embedded default configuration.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (this is a compile-time
/// guarantee since the config is embedded).
#[must_use]
pub fn default_config() -> CoreConfig {
    parse_config_toml(DEFAULT_CONFIG_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded default.toml: {e}"))
}
