//! Headline dashboard numbers.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use coastwatch_analytics_models::DashboardStats;
use coastwatch_hazard_models::{Report, VerificationStatus, round_hundredths};
use coastwatch_hotspot::HotspotClusterer;

/// Dashboard aggregation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardOptions {
    /// Reports newer than this count as active.
    pub active_window: TimeDelta,
    /// Priority score at or above which a report is a high-priority alert.
    pub high_priority_threshold: f64,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            active_window: TimeDelta::hours(24),
            high_priority_threshold: 4.0,
        }
    }
}

/// Computes dashboard statistics over the active reports in `reports`.
///
/// The hotspot count comes from `clusterer`, which applies its own window.
#[must_use]
pub fn dashboard_stats(
    reports: &[Report],
    now: DateTime<Utc>,
    options: &DashboardOptions,
    clusterer: &HotspotClusterer,
) -> DashboardStats {
    let mut hazard_distribution = BTreeMap::new();
    let mut total_reports = 0_u64;
    let mut verified_reports = 0_u64;
    let mut high_priority_alerts = 0_u64;
    let mut severity_sum = 0_u64;

    for report in reports
        .iter()
        .filter(|r| now - r.timestamp <= options.active_window)
    {
        total_reports += 1;
        severity_sum += u64::from(report.severity.value());
        *hazard_distribution.entry(report.hazard_type).or_insert(0) += 1;

        if report.verification_status == VerificationStatus::Verified {
            verified_reports += 1;
        }
        if report.priority_score >= options.high_priority_threshold {
            high_priority_alerts += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average_severity = if total_reports == 0 {
        0.0
    } else {
        round_hundredths(severity_sum as f64 / total_reports as f64)
    };

    let hotspot_count = clusterer.cluster(reports, now).len() as u64;

    log::debug!(
        "Dashboard: {total_reports} active, {verified_reports} verified, \
         {high_priority_alerts} high priority, {hotspot_count} hotspot(s)"
    );

    DashboardStats {
        total_reports,
        verified_reports,
        active_hazards: hazard_distribution.len() as u64,
        high_priority_alerts,
        hotspot_count,
        average_severity,
        hazard_distribution,
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use coastwatch_hazard_models::{HazardType, ReportId, Severity};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 30, 12, 0, 0).unwrap()
    }

    fn report(
        id: &str,
        hazard_type: HazardType,
        severity: Severity,
        priority_score: f64,
        age: TimeDelta,
    ) -> Report {
        Report {
            id: ReportId::from(id),
            user_id: "citizen".to_string(),
            latitude: 13.08,
            longitude: 80.27,
            location_name: None,
            hazard_type,
            severity,
            description: String::new(),
            timestamp: now() - age,
            media_urls: Vec::new(),
            verification_status: VerificationStatus::Pending,
            priority_score,
            corroborators: Vec::new(),
            weather_conditions: None,
        }
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        let stats = dashboard_stats(
            &[],
            now(),
            &DashboardOptions::default(),
            &HotspotClusterer::default(),
        );
        assert_eq!(stats.total_reports, 0);
        assert_eq!(stats.hotspot_count, 0);
        assert!(stats.average_severity.abs() < f64::EPSILON);
        assert!(stats.hazard_distribution.is_empty());
        assert_eq!(stats.last_updated, now());
    }

    #[test]
    fn aggregates_active_reports() {
        let hour = TimeDelta::hours(1);
        let mut verified = report("a", HazardType::Cyclone, Severity::High, 5.04, hour);
        verified.verification_status = VerificationStatus::Verified;
        let reports = [
            verified,
            report("b", HazardType::Cyclone, Severity::High, 5.04, hour),
            report("c", HazardType::HighWaves, Severity::Low, 1.2, hour),
            report("old", HazardType::Tsunami, Severity::Critical, 15.0, TimeDelta::hours(30)),
        ];
        let stats = dashboard_stats(
            &reports,
            now(),
            &DashboardOptions::default(),
            &HotspotClusterer::default(),
        );
        assert_eq!(stats.total_reports, 3);
        assert_eq!(stats.verified_reports, 1);
        assert_eq!(stats.active_hazards, 2);
        assert_eq!(stats.high_priority_alerts, 2);
        assert_eq!(stats.hazard_distribution[&HazardType::Cyclone], 2);
        assert_eq!(stats.hazard_distribution[&HazardType::HighWaves], 1);
        assert!(!stats.hazard_distribution.contains_key(&HazardType::Tsunami));
        assert!((stats.average_severity - 3.33).abs() < 1e-9);
        // All three active reports share one grid cell.
        assert_eq!(stats.hotspot_count, 1);
    }

    #[test]
    fn threshold_is_inclusive() {
        let options = DashboardOptions {
            high_priority_threshold: 5.04,
            ..DashboardOptions::default()
        };
        let reports = [report(
            "a",
            HazardType::Cyclone,
            Severity::High,
            5.04,
            TimeDelta::hours(1),
        )];
        let stats = dashboard_stats(&reports, now(), &options, &HotspotClusterer::default());
        assert_eq!(stats.high_priority_alerts, 1);
    }
}
