#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hazard report types, hazard taxonomy and severity definitions.
//!
//! This crate defines the report representation shared by every part of
//! the coastwatch core: the corroboration search, the priority scorer, the
//! hotspot clusterer and the dashboard analytics all consume [`Report`]
//! values and never see how they are persisted.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Raised when a caller hands the core a value it promised was already
/// validated (a malformed coordinate or an out-of-range severity).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidInputError {
    /// Coordinate is non-finite or outside the WGS84 range.
    #[error("invalid coordinate ({latitude}, {longitude})")]
    Coordinate {
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },

    /// Severity outside 1-5.
    #[error("invalid severity value {value}: expected 1-5")]
    Severity {
        /// The invalid severity value that was provided.
        value: u8,
    },
}

/// Checks that a coordinate is finite and within WGS84 latitude/longitude
/// ranges.
///
/// # Errors
///
/// Returns [`InvalidInputError::Coordinate`] if either component is NaN,
/// infinite, or out of range.
pub fn check_coordinate(latitude: f64, longitude: f64) -> Result<(), InvalidInputError> {
    if latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
    {
        Ok(())
    } else {
        Err(InvalidInputError::Coordinate {
            latitude,
            longitude,
        })
    }
}

/// Rounds to two decimal places, half away from zero.
#[must_use]
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Severity reported by a citizen, from 1 (minor) to 5 (critical).
///
/// Serialized as its bare numeric value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
#[serde(try_from = "u8", into = "u8")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    /// Level 1: noticeable but harmless
    Minor = 1,
    /// Level 2: localized nuisance
    Low = 2,
    /// Level 3: property at risk
    Moderate = 3,
    /// Level 4: people at risk
    High = 4,
    /// Level 5: immediate danger to life
    Critical = 5,
}

impl Severity {
    /// Returns the numeric value of this severity level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a severity level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Severity`] if the value is not in 1-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidInputError> {
        match value {
            1 => Ok(Self::Minor),
            2 => Ok(Self::Low),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::High),
            5 => Ok(Self::Critical),
            _ => Err(InvalidInputError::Severity { value }),
        }
    }

    /// Returns all variants, lowest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Minor,
            Self::Low,
            Self::Moderate,
            Self::High,
            Self::Critical,
        ]
    }
}

impl TryFrom<u8> for Severity {
    type Error = InvalidInputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.value()
    }
}

/// Coastal hazard categories a citizen can report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HazardType {
    /// Seismic sea wave
    Tsunami,
    /// Wind-driven rise in sea level
    StormSurge,
    /// Abnormally high swell
    HighWaves,
    /// Inundation of low-lying coast
    CoastalFlooding,
    /// Tropical cyclone landfall or approach
    Cyclone,
    /// Strong seaward current
    RipCurrent,
    /// Loss of shoreline
    CoastalErosion,
    /// Anything not fitting the above
    Other,
}

impl HazardType {
    /// Returns the built-in priority weight for this hazard.
    #[must_use]
    pub const fn default_weight(self) -> f64 {
        match self {
            Self::Tsunami => 5.0,
            Self::StormSurge | Self::Cyclone => 4.5,
            Self::CoastalFlooding => 3.5,
            Self::HighWaves | Self::RipCurrent => 3.0,
            Self::CoastalErosion => 2.0,
            Self::Other => 1.0,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Tsunami,
            Self::StormSurge,
            Self::HighWaves,
            Self::CoastalFlooding,
            Self::Cyclone,
            Self::RipCurrent,
            Self::CoastalErosion,
            Self::Other,
        ]
    }
}

/// Review state of a report. Owned by the moderation workflow; the core
/// only reads it.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VerificationStatus {
    /// Not yet reviewed.
    #[default]
    Pending,
    /// Confirmed by a verifier.
    Verified,
    /// Dismissed by a verifier.
    Rejected,
}

/// Threat classification of a hotspot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ThreatLevel {
    /// Average severity below the high threshold.
    Medium,
    /// Average severity at or above the high threshold.
    High,
}

/// Opaque report identifier assigned by the report store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    /// Wraps an identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReportId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ReportId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A nearby report found at ingestion time.
///
/// Stored on the new report as a frozen snapshot; it is never refreshed
/// when later reports arrive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corroborator {
    /// Identifier of the nearby report.
    pub report_id: ReportId,
    /// Geodesic distance to the new report in kilometers, two decimals.
    pub distance_km: f64,
    /// Hazard type of the nearby report.
    pub hazard_type: HazardType,
    /// Severity of the nearby report.
    pub severity: Severity,
}

/// A citizen hazard report as handed to the core by the report store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Store-assigned identifier.
    pub id: ReportId,
    /// Submitting user.
    pub user_id: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Free-form place name (e.g. "Marina Beach").
    #[serde(default)]
    pub location_name: Option<String>,
    /// Reported hazard.
    pub hazard_type: HazardType,
    /// Reported severity.
    pub severity: Severity,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// When the report was created.
    pub timestamp: DateTime<Utc>,
    /// URLs of attached media.
    #[serde(default)]
    pub media_urls: Vec<String>,
    /// Review state.
    #[serde(default)]
    pub verification_status: VerificationStatus,
    /// Priority computed at ingestion.
    #[serde(default)]
    pub priority_score: f64,
    /// Nearby reports found at ingestion.
    #[serde(default)]
    pub corroborators: Vec<Corroborator>,
    /// Weather payload attached by the submitter, passed through untouched.
    #[serde(default)]
    pub weather_conditions: Option<serde_json::Value>,
}

/// A validated submission that has not been scored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmission {
    /// Identifier pre-assigned by the store, if any.
    #[serde(default)]
    pub id: Option<ReportId>,
    /// Submitting user.
    pub user_id: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Free-form place name.
    #[serde(default)]
    pub location_name: Option<String>,
    /// Reported hazard.
    pub hazard_type: HazardType,
    /// Reported severity.
    pub severity: Severity,
    /// Free-text description.
    pub description: String,
    /// URLs of already-stored media.
    #[serde(default)]
    pub media_urls: Vec<String>,
    /// Weather payload.
    #[serde(default)]
    pub weather_conditions: Option<serde_json::Value>,
}

/// A grid cell with enough recent reports to be worth alerting on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Quantized cell latitude.
    pub center_lat: f64,
    /// Quantized cell longitude.
    pub center_lon: f64,
    /// Number of reports in the cell.
    pub report_count: usize,
    /// Mean severity of the cell's reports, two decimals.
    pub average_severity: f64,
    /// Distinct hazard types seen in the cell.
    pub hazard_types: BTreeSet<HazardType>,
    /// Threat classification.
    pub threat_level: ThreatLevel,
    /// Member report ids in the order they were bucketed.
    pub report_ids: Vec<ReportId>,
}

impl Hotspot {
    /// Ranking key: `report_count * average_severity`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rank(&self) -> f64 {
        self.report_count as f64 * self.average_severity
    }
}

/// Hotspots plus the context they were computed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotSummary {
    /// Ranked hotspots, most urgent first.
    pub hotspots: Vec<Hotspot>,
    /// Number of reports inside the clustering window.
    pub total_reports: usize,
    /// Clustering window in hours.
    pub time_range_hours: i64,
}
