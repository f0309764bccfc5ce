//! Report list queries for the dashboard.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use coastwatch_analytics_models::{ActiveReportsParams, DEFAULT_ACTIVE_HOURS, ReportFilterParams};
use coastwatch_hazard_models::Report;

use crate::AnalyticsError;

/// Parses a date parameter. Accepts RFC 3339, a bare
/// `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or `YYYY-MM-DD` (midnight UTC).
fn parse_date(s: &str) -> Result<DateTime<Utc>, AnalyticsError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
        .map_err(|e| AnalyticsError::Query {
            message: format!("Invalid date '{s}': {e}. Expected format: YYYY-MM-DD"),
        })
}

fn meets_min_severity(report: &Report, min_severity: Option<u8>) -> bool {
    min_severity.is_none_or(|min| report.severity.value() >= min)
}

/// Returns reports newer than `params.hours`, optionally filtered by
/// minimum severity and review state, highest priority first.
///
/// Reports with equal priority keep their input order.
///
/// # Errors
///
/// Returns [`AnalyticsError::Query`] if `hours` is not positive.
pub fn active_reports<'a>(
    reports: &'a [Report],
    now: DateTime<Utc>,
    params: &ActiveReportsParams,
) -> Result<Vec<&'a Report>, AnalyticsError> {
    let hours = params.hours.unwrap_or(DEFAULT_ACTIVE_HOURS);
    let window = TimeDelta::try_hours(hours)
        .filter(|w| *w > TimeDelta::zero())
        .ok_or_else(|| AnalyticsError::Query {
            message: format!("Invalid hours '{hours}': expected a positive number of hours"),
        })?;

    let mut active: Vec<&Report> = reports
        .iter()
        .filter(|r| now - r.timestamp <= window)
        .filter(|r| meets_min_severity(r, params.min_severity))
        .filter(|r| {
            params
                .verification_status
                .is_none_or(|status| r.verification_status == status)
        })
        .collect();

    active.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));

    log::debug!("{} active report(s) in the last {hours}h", active.len());

    Ok(active)
}

/// Returns reports matching every provided filter, newest first.
///
/// # Errors
///
/// Returns [`AnalyticsError::Query`] if a date parameter cannot be parsed.
pub fn filter_reports<'a>(
    reports: &'a [Report],
    params: &ReportFilterParams,
) -> Result<Vec<&'a Report>, AnalyticsError> {
    let start = params.start_date.as_deref().map(parse_date).transpose()?;
    let end = params.end_date.as_deref().map(parse_date).transpose()?;
    let location = params.location.as_deref().map(str::to_lowercase);

    let mut matched: Vec<&Report> = reports
        .iter()
        .filter(|r| start.is_none_or(|start| r.timestamp >= start))
        .filter(|r| end.is_none_or(|end| r.timestamp <= end))
        .filter(|r| {
            location.as_deref().is_none_or(|needle| {
                r.location_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(needle))
            })
        })
        .filter(|r| params.hazard_type.is_none_or(|h| r.hazard_type == h))
        .filter(|r| meets_min_severity(r, params.min_severity))
        .filter(|r| {
            params
                .verification_status
                .is_none_or(|status| r.verification_status == status)
        })
        .collect();

    matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    Ok(matched)
}
