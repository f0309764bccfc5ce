#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hazard report ingestion pipeline.
//!
//! A submission is gated against the service area, matched against the
//! existing report snapshot for corroborating reports, and scored. The
//! result is a fully populated [`Report`] ready for the store, plus the
//! number of nearby reports that were found.
//!
//! The [`components`] module builds every core component from a
//! [`CoreConfig`], and [`snapshot`] reads the JSON files the CLI works on.

pub mod components;
pub mod snapshot;

use chrono::{DateTime, Utc};
use coastwatch_config::{ConfigError, CoreConfig};
use coastwatch_hazard_models::{
    InvalidInputError, Report, ReportId, ReportSubmission, VerificationStatus,
};
use coastwatch_priority::PriorityScorer;
use coastwatch_spatial::{GeoIndex, ServiceArea};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while ingesting reports.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The submission lies outside the accepted service area.
    #[error("Location ({latitude}, {longitude}) is outside the service area")]
    OutsideServiceArea {
        /// Submitted latitude.
        latitude: f64,
        /// Submitted longitude.
        longitude: f64,
    },

    /// A coordinate or severity was out of range.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// Configuration could not be loaded or was out of range.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error reading an input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A newly ingested report and how many nearby reports corroborate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredReport {
    /// The scored report, pending review.
    pub report: Report,
    /// Number of corroborating reports found at ingestion.
    pub nearby_reports_count: usize,
}

/// Gates, corroborates and scores incoming submissions.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportIngestor {
    service_area: ServiceArea,
    geo_index: GeoIndex,
    scorer: PriorityScorer,
}

impl ReportIngestor {
    /// Creates an ingestor from already configured components.
    #[must_use]
    pub const fn new(service_area: ServiceArea, geo_index: GeoIndex, scorer: PriorityScorer) -> Self {
        Self {
            service_area,
            geo_index,
            scorer,
        }
    }

    /// Builds an ingestor from the corroboration, service area and weight
    /// sections of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Config`] if the corroboration window does not
    /// fit in a [`chrono::TimeDelta`].
    pub fn from_config(config: &CoreConfig) -> Result<Self, IngestError> {
        Ok(Self::new(
            components::service_area(config),
            components::geo_index(config)?,
            components::priority_scorer(config),
        ))
    }

    #[must_use]
    pub const fn service_area(&self) -> &ServiceArea {
        &self.service_area
    }

    #[must_use]
    pub const fn geo_index(&self) -> &GeoIndex {
        &self.geo_index
    }

    #[must_use]
    pub const fn scorer(&self) -> &PriorityScorer {
        &self.scorer
    }

    /// Runs one submission through the pipeline against the `existing`
    /// report snapshot.
    ///
    /// A report in `existing` with the submission's own id is never
    /// counted as its corroborator. Submissions without an id are given a
    /// random UUID. The returned report is stamped with `now` and is
    /// pending review.
    ///
    /// # Errors
    ///
    /// * [`IngestError::OutsideServiceArea`] if the location is outside
    ///   the service area (including NaN coordinates)
    /// * [`IngestError::InvalidInput`] if the submitted coordinate is not
    ///   a valid WGS84 coordinate
    pub fn ingest(
        &self,
        submission: ReportSubmission,
        existing: &[Report],
        now: DateTime<Utc>,
    ) -> Result<ScoredReport, IngestError> {
        let ReportSubmission {
            id,
            user_id,
            latitude,
            longitude,
            location_name,
            hazard_type,
            severity,
            description,
            media_urls,
            weather_conditions,
        } = submission;

        if !self
            .service_area
            .is_within_service_area(latitude, longitude)
        {
            log::warn!(
                "Rejected submission from {user_id}: ({latitude}, {longitude}) is outside \
                 the service area"
            );
            return Err(IngestError::OutsideServiceArea {
                latitude,
                longitude,
            });
        }

        let id = id.unwrap_or_else(|| ReportId::new(uuid::Uuid::new_v4().to_string()));

        let mut corroborators = self
            .geo_index
            .find_nearby(existing, latitude, longitude, now)?;
        corroborators.retain(|c| c.report_id != id);

        let priority_score = self.scorer.score(hazard_type, severity, &corroborators);
        let nearby_reports_count = corroborators.len();

        log::info!(
            "Ingested report {id}: {hazard_type} severity {} with {nearby_reports_count} \
             corroborating report(s), priority {priority_score}",
            severity.value()
        );

        Ok(ScoredReport {
            report: Report {
                id,
                user_id,
                latitude,
                longitude,
                location_name,
                hazard_type,
                severity,
                description,
                timestamp: now,
                media_urls,
                verification_status: VerificationStatus::Pending,
                priority_score,
                corroborators,
                weather_conditions,
            },
            nearby_reports_count,
        })
    }
}

impl Default for ReportIngestor {
    fn default() -> Self {
        Self::new(
            ServiceArea::default(),
            GeoIndex::default(),
            PriorityScorer::default(),
        )
    }
}
