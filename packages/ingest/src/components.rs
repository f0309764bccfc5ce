//! Builds the core components from a [`CoreConfig`].

use chrono::TimeDelta;
use coastwatch_analytics::dashboard::DashboardOptions;
use coastwatch_config::{ConfigError, CoreConfig};
use coastwatch_hotspot::HotspotClusterer;
use coastwatch_priority::PriorityScorer;
use coastwatch_spatial::{GeoIndex, ServiceArea};

use crate::IngestError;

fn hours(field: &'static str, hours: i64) -> Result<TimeDelta, IngestError> {
    TimeDelta::try_hours(hours).ok_or_else(|| {
        IngestError::Config(ConfigError::Invalid {
            field,
            message: format!("{hours} hours is out of range"),
        })
    })
}

#[must_use]
pub const fn service_area(config: &CoreConfig) -> ServiceArea {
    let area = &config.service_area;
    ServiceArea::new(area.min_lat, area.max_lat, area.min_lon, area.max_lon)
}

/// # Errors
///
/// Returns [`IngestError::Config`] if `max_age_hours` is out of range.
pub fn geo_index(config: &CoreConfig) -> Result<GeoIndex, IngestError> {
    let corroboration = &config.corroboration;
    Ok(GeoIndex::new(
        corroboration.radius_km,
        hours("corroboration.max_age_hours", corroboration.max_age_hours)?,
    ))
}

#[must_use]
pub fn priority_scorer(config: &CoreConfig) -> PriorityScorer {
    PriorityScorer::new(config.hazard_weights.clone())
}

/// # Errors
///
/// Returns [`IngestError::Config`] if `window_hours` is out of range.
pub fn hotspot_clusterer(config: &CoreConfig) -> Result<HotspotClusterer, IngestError> {
    let clustering = &config.clustering;
    Ok(HotspotClusterer::new(
        clustering.grid_resolution_deg,
        hours("clustering.window_hours", clustering.window_hours)?,
        clustering.min_reports,
    ))
}

/// # Errors
///
/// Returns [`IngestError::Config`] if `active_window_hours` is out of range.
pub fn dashboard_options(config: &CoreConfig) -> Result<DashboardOptions, IngestError> {
    let dashboard = &config.dashboard;
    Ok(DashboardOptions {
        active_window: hours("dashboard.active_window_hours", dashboard.active_window_hours)?,
        high_priority_threshold: dashboard.high_priority_threshold,
    })
}
