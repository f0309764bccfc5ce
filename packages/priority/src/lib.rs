#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Priority scoring for citizen hazard reports.
//!
//! A report's priority combines three factors multiplicatively:
//!
//! - a per-hazard base weight (tsunami 5.0 down to other 1.0),
//! - its severity as a fraction of the maximum (`severity / 5`),
//! - a corroboration bonus of 20% per nearby report, capped at 200%.
//!
//! The result is rounded to two decimals. Scores depend only on their
//! inputs, so re-scoring the same report always yields the same value.

use std::collections::BTreeMap;

use coastwatch_hazard_models::{
    Corroborator, HazardType, InvalidInputError, Severity, round_hundredths,
};

/// Weight used for hazards missing from the weight table, and for hazard
/// names the scorer does not recognize.
pub const FALLBACK_WEIGHT: f64 = 1.0;

/// Bonus added per corroborating report.
pub const BONUS_PER_CORROBORATOR: f64 = 0.2;

/// Upper bound on the corroboration bonus. Reached at 10 corroborators.
pub const MAX_CLUSTER_BONUS: f64 = 2.0;

/// Returns the corroboration bonus for `count` nearby reports.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cluster_bonus(count: usize) -> f64 {
    (count as f64 * BONUS_PER_CORROBORATOR).min(MAX_CLUSTER_BONUS)
}

/// Scores reports from a hazard weight table.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityScorer {
    weights: BTreeMap<HazardType, f64>,
}

impl PriorityScorer {
    /// Creates a scorer from a hazard weight table. Hazards absent from the
    /// table score with [`FALLBACK_WEIGHT`].
    #[must_use]
    pub const fn new(weights: BTreeMap<HazardType, f64>) -> Self {
        Self { weights }
    }

    /// Base weight for a hazard.
    #[must_use]
    pub fn weight(&self, hazard_type: HazardType) -> f64 {
        self.weights
            .get(&hazard_type)
            .copied()
            .unwrap_or(FALLBACK_WEIGHT)
    }

    #[must_use]
    pub const fn weights(&self) -> &BTreeMap<HazardType, f64> {
        &self.weights
    }

    /// Highest score this scorer can produce: the largest weight at full
    /// severity with the maximum bonus.
    #[must_use]
    pub fn max_score(&self) -> f64 {
        let max_weight = self
            .weights
            .values()
            .copied()
            .fold(FALLBACK_WEIGHT, f64::max);
        max_weight * (1.0 + MAX_CLUSTER_BONUS)
    }

    /// Scores a report from its hazard, severity and corroborating set.
    #[must_use]
    pub fn score(
        &self,
        hazard_type: HazardType,
        severity: Severity,
        corroborators: &[Corroborator],
    ) -> f64 {
        self.score_count(hazard_type, severity, corroborators.len())
    }

    /// Scores a report given only the number of corroborators.
    #[must_use]
    pub fn score_count(&self, hazard_type: HazardType, severity: Severity, count: usize) -> f64 {
        combine(self.weight(hazard_type), severity, count)
    }

    /// Scores from untyped values as they arrive from a loosely-typed
    /// boundary.
    ///
    /// Unknown hazard names are not an error: they score with
    /// [`FALLBACK_WEIGHT`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Severity`] if `severity` is not in 1-5.
    pub fn score_raw(
        &self,
        hazard_type: &str,
        severity: u8,
        count: usize,
    ) -> Result<f64, InvalidInputError> {
        let severity = Severity::from_value(severity)?;
        let base = hazard_type.parse::<HazardType>().map_or_else(
            |_| {
                log::debug!("Unknown hazard type {hazard_type:?}, using fallback weight");
                FALLBACK_WEIGHT
            },
            |hazard| self.weight(hazard),
        );
        Ok(combine(base, severity, count))
    }
}

fn combine(base: f64, severity: Severity, count: usize) -> f64 {
    let severity_multiplier = f64::from(severity.value()) / 5.0;
    round_hundredths(base * severity_multiplier * (1.0 + cluster_bonus(count)))
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new(
            HazardType::all()
                .iter()
                .map(|hazard| (*hazard, hazard.default_weight()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn cyclone_with_two_corroborators() {
        let scorer = PriorityScorer::default();
        assert_close(scorer.score_count(HazardType::Cyclone, Severity::High, 2), 5.04);
    }

    #[test]
    fn lone_report_has_no_bonus() {
        let scorer = PriorityScorer::default();
        assert_close(
            scorer.score(HazardType::Tsunami, Severity::Critical, &[]),
            5.0,
        );
        assert_close(scorer.score_count(HazardType::Other, Severity::Minor, 0), 0.2);
    }

    #[test]
    fn monotonic_in_severity() {
        let scorer = PriorityScorer::default();
        for hazard in HazardType::all() {
            for count in [0, 1, 5, 10, 50] {
                let scores: Vec<f64> = Severity::all()
                    .iter()
                    .map(|s| scorer.score_count(*hazard, *s, count))
                    .collect();
                for pair in scores.windows(2) {
                    assert!(
                        pair[0] <= pair[1],
                        "{hazard} with {count} corroborators not monotonic: {scores:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn bounded_by_three_times_max_weight() {
        let scorer = PriorityScorer::default();
        assert_close(scorer.max_score(), 15.0);
        for hazard in HazardType::all() {
            for severity in Severity::all() {
                for count in [0, 3, 10, 1_000] {
                    let score = scorer.score_count(*hazard, *severity, count);
                    assert!(score > 0.0);
                    assert!(score <= scorer.max_score());
                }
            }
        }
        assert_close(
            scorer.score_count(HazardType::Tsunami, Severity::Critical, 100),
            15.0,
        );
    }

    #[test]
    fn corroboration_never_decreases_score() {
        let scorer = PriorityScorer::default();
        let mut previous = 0.0;
        for count in 0..=20 {
            let score = scorer.score_count(HazardType::StormSurge, Severity::Moderate, count);
            assert!(score >= previous, "score dropped at {count}");
            previous = score;
        }
    }

    #[test]
    fn bonus_saturates_at_ten() {
        assert_close(cluster_bonus(0), 0.0);
        assert_close(cluster_bonus(9), 1.8);
        assert_close(cluster_bonus(10), 2.0);
        assert_close(cluster_bonus(100), 2.0);
    }

    #[test]
    fn missing_weight_falls_back() {
        let scorer = PriorityScorer::new(BTreeMap::from([(HazardType::Tsunami, 5.0)]));
        assert_close(scorer.weight(HazardType::Cyclone), FALLBACK_WEIGHT);
        assert_close(scorer.score_count(HazardType::Cyclone, Severity::Critical, 0), 1.0);
    }

    #[test]
    fn raw_unknown_hazard_degrades() {
        let scorer = PriorityScorer::default();
        assert_close(scorer.score_raw("volcano", 5, 0).unwrap(), 1.0);
        assert_close(scorer.score_raw("cyclone", 4, 2).unwrap(), 5.04);
    }

    #[test]
    fn raw_invalid_severity_is_an_error() {
        let scorer = PriorityScorer::default();
        assert_eq!(
            scorer.score_raw("cyclone", 0, 0),
            Err(InvalidInputError::Severity { value: 0 })
        );
        assert!(scorer.score_raw("cyclone", 6, 0).is_err());
    }
}
