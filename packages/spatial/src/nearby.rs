//! Corroboration search: recent reports within a radius of a point.
//!
//! This is a linear scan over whatever slice the caller hands in. The
//! candidate set is bounded to recent reports (hours, not years), so no
//! spatial index is built; callers holding very large stores should
//! pre-filter by recency before calling.

use chrono::{DateTime, TimeDelta, Utc};
use coastwatch_hazard_models::{
    Corroborator, InvalidInputError, Report, check_coordinate, round_hundredths,
};

use crate::distance_km;

/// Finds recent reports near a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoIndex {
    radius_km: f64,
    max_age: TimeDelta,
}

impl GeoIndex {
    /// Default search radius in kilometers.
    pub const DEFAULT_RADIUS_KM: f64 = 5.0;

    /// Creates an index searching `radius_km` around a point and ignoring
    /// reports older than `max_age`.
    #[must_use]
    pub const fn new(radius_km: f64, max_age: TimeDelta) -> Self {
        Self { radius_km, max_age }
    }

    /// Search radius in kilometers.
    #[must_use]
    pub const fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Oldest report age still considered.
    #[must_use]
    pub const fn max_age(&self) -> TimeDelta {
        self.max_age
    }

    /// Returns every report within the radius of `(latitude, longitude)`
    /// whose age relative to `now` is at most `max_age`.
    ///
    /// Results are ordered by ascending (rounded) distance; reports at the
    /// same distance keep their input order. A report exactly at the
    /// center has distance `0.0` and is included. Stored reports with a
    /// NaN, infinite or out-of-range coordinate are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Coordinate`] if the center is not a
    /// valid coordinate.
    pub fn find_nearby(
        &self,
        reports: &[Report],
        latitude: f64,
        longitude: f64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Corroborator>, InvalidInputError> {
        check_coordinate(latitude, longitude)?;

        let mut nearby = Vec::new();
        let mut recent = 0_usize;

        for report in reports {
            if now - report.timestamp > self.max_age {
                continue;
            }
            recent += 1;

            if let Err(e) = check_coordinate(report.latitude, report.longitude) {
                log::warn!("Skipping report {} in corroboration search: {e}", report.id);
                continue;
            }
            let distance = distance_km(latitude, longitude, report.latitude, report.longitude);

            if distance <= self.radius_km {
                nearby.push(Corroborator {
                    report_id: report.id.clone(),
                    distance_km: round_hundredths(distance),
                    hazard_type: report.hazard_type,
                    severity: report.severity,
                });
            }
        }

        nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        log::debug!(
            "Found {} corroborating report(s) within {} km of ({latitude}, {longitude}) \
             among {recent} recent of {} total",
            nearby.len(),
            self.radius_km,
            reports.len()
        );

        Ok(nearby)
    }
}

impl Default for GeoIndex {
    /// 5 km radius, 24 hour window.
    fn default() -> Self {
        Self::new(Self::DEFAULT_RADIUS_KM, TimeDelta::hours(24))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use coastwatch_hazard_models::{HazardType, ReportId, Severity, VerificationStatus};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 30, 12, 0, 0).unwrap()
    }

    fn report(id: &str, latitude: f64, longitude: f64, age: TimeDelta) -> Report {
        Report {
            id: ReportId::from(id),
            user_id: "citizen".to_string(),
            latitude,
            longitude,
            location_name: None,
            hazard_type: HazardType::Cyclone,
            severity: Severity::High,
            description: String::new(),
            timestamp: now() - age,
            media_urls: Vec::new(),
            verification_status: VerificationStatus::Pending,
            priority_score: 0.0,
            corroborators: Vec::new(),
            weather_conditions: None,
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let found = GeoIndex::default()
            .find_nearby(&[], 13.08, 80.27, now())
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn includes_report_at_exact_center() {
        let reports = [report("a", 13.08, 80.27, TimeDelta::minutes(5))];
        let found = GeoIndex::default()
            .find_nearby(&reports, 13.08, 80.27, now())
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].distance_km.abs() < f64::EPSILON);
        assert_eq!(found[0].report_id.as_str(), "a");
        assert_eq!(found[0].hazard_type, HazardType::Cyclone);
        assert_eq!(found[0].severity, Severity::High);
    }

    #[test]
    fn excludes_stale_reports_even_when_colocated() {
        let reports = [
            report("fresh", 13.08, 80.27, TimeDelta::hours(23)),
            report("edge", 13.08, 80.27, TimeDelta::hours(24)),
            report("stale", 13.08, 80.27, TimeDelta::hours(24) + TimeDelta::seconds(1)),
        ];
        let found = GeoIndex::default()
            .find_nearby(&reports, 13.08, 80.27, now())
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|c| c.report_id.as_str()).collect();
        assert_eq!(ids, ["fresh", "edge"]);
    }

    #[test]
    fn excludes_reports_beyond_radius() {
        // 0.1 degrees of latitude is roughly 11 km.
        let reports = [
            report("near", 13.09, 80.27, TimeDelta::hours(1)),
            report("far", 13.18, 80.27, TimeDelta::hours(1)),
        ];
        let found = GeoIndex::default()
            .find_nearby(&reports, 13.08, 80.27, now())
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].report_id.as_str(), "near");
        assert!((found[0].distance_km - 1.11).abs() < 0.011);
    }

    #[test]
    fn orders_by_distance_with_stable_ties() {
        let reports = [
            report("far", 13.11, 80.27, TimeDelta::hours(1)),
            report("tie_first", 13.08, 80.27, TimeDelta::hours(1)),
            report("mid", 13.09, 80.27, TimeDelta::hours(1)),
            report("tie_second", 13.08, 80.27, TimeDelta::hours(2)),
        ];
        let found = GeoIndex::default()
            .find_nearby(&reports, 13.08, 80.27, now())
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|c| c.report_id.as_str()).collect();
        assert_eq!(ids, ["tie_first", "tie_second", "mid", "far"]);
    }

    #[test]
    fn rounds_distance_to_two_decimals() {
        let reports = [report("a", 13.1, 80.3, TimeDelta::hours(1))];
        let found = GeoIndex::new(10.0, TimeDelta::hours(24))
            .find_nearby(&reports, 13.08, 80.27, now())
            .unwrap();
        let d = found[0].distance_km;
        assert!((d * 100.0 - (d * 100.0).round()).abs() < 1e-9);
    }

    #[test]
    fn rejects_invalid_center() {
        let reports = [report("a", 13.08, 80.27, TimeDelta::hours(1))];
        let err = GeoIndex::default()
            .find_nearby(&reports, f64::NAN, 80.27, now())
            .unwrap_err();
        assert!(matches!(err, InvalidInputError::Coordinate { .. }));
    }

    #[test]
    fn skips_invalid_candidate_coordinate() {
        let hour = TimeDelta::hours(1);
        let reports = [
            report("a", 13.08, 80.27, hour),
            report("corrupt", 95.0, 10.0, hour),
            report("b", 13.081, 80.271, hour),
            report("nan", f64::NAN, 80.27, hour),
        ];
        let found = GeoIndex::default()
            .find_nearby(&reports, 13.08, 80.27, now())
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|c| c.report_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn ignores_invalid_coordinate_on_stale_report() {
        let reports = [report("old", f64::NAN, 80.27, TimeDelta::days(3))];
        let found = GeoIndex::default()
            .find_nearby(&reports, 13.08, 80.27, now())
            .unwrap();
        assert!(found.is_empty());
    }
}
