#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard statistics and report query types.
//!
//! Parameter types mirror what the dashboard boundary receives as query
//! strings, so most fields are optional and loosely typed. Result types are
//! serialized to JSON by that boundary.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use coastwatch_hazard_models::{HazardType, VerificationStatus};
use serde::{Deserialize, Serialize};

/// Default look-back for the active-reports query, in hours.
pub const DEFAULT_ACTIVE_HOURS: i64 = 24;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Reports in the active window.
    pub total_reports: u64,
    /// Active reports marked verified.
    pub verified_reports: u64,
    /// Distinct hazard types among active reports.
    pub active_hazards: u64,
    /// Active reports whose priority meets the high-priority threshold.
    pub high_priority_alerts: u64,
    /// Number of current hotspots.
    pub hotspot_count: u64,
    /// Mean severity of active reports, two decimals (0 when none).
    pub average_severity: f64,
    /// Active report count per hazard type.
    pub hazard_distribution: BTreeMap<HazardType, u64>,
    /// When these numbers were computed.
    pub last_updated: DateTime<Utc>,
}

/// Parameters for listing currently active reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveReportsParams {
    /// Look-back window in hours (defaults to [`DEFAULT_ACTIVE_HOURS`]).
    pub hours: Option<i64>,
    /// Minimum severity (1-5).
    pub min_severity: Option<u8>,
    /// Only reports in this review state.
    pub verification_status: Option<VerificationStatus>,
}

/// Parameters for the free-form report filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilterParams {
    /// Earliest timestamp, inclusive (RFC 3339, `YYYY-MM-DDTHH:MM:SS`, or
    /// `YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Latest timestamp, inclusive. Same formats as `start_date`.
    pub end_date: Option<String>,
    /// Case-insensitive substring of the report's location name.
    pub location: Option<String>,
    /// Only this hazard type.
    pub hazard_type: Option<HazardType>,
    /// Minimum severity (1-5).
    pub min_severity: Option<u8>,
    /// Only reports in this review state.
    pub verification_status: Option<VerificationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_deserialize_from_camel_case() {
        let params: ReportFilterParams = serde_json::from_str(
            r#"{"startDate": "2024-11-01", "hazardType": "storm_surge", "verificationStatus": "verified"}"#,
        )
        .unwrap();
        assert_eq!(params.start_date.as_deref(), Some("2024-11-01"));
        assert_eq!(params.hazard_type, Some(HazardType::StormSurge));
        assert_eq!(params.verification_status, Some(VerificationStatus::Verified));
        assert!(params.location.is_none());
    }

    #[test]
    fn active_params_default_to_empty() {
        let params: ActiveReportsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, ActiveReportsParams::default());
    }
}
