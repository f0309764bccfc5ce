#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Grid-based hotspot clustering.
//!
//! Recent reports are bucketed into fixed-size lat/lon grid cells (0.1
//! degrees, roughly 11 km, by default). Cells with at least `min_reports`
//! members become [`Hotspot`]s, classified by average severity and ranked
//! by `report_count * average_severity`.
//!
//! Every call starts from an empty grid: an accumulation pass builds one
//! [`grid::CellAggregate`] per touched cell, then a pure filter-and-finalize
//! pass turns the survivors into hotspots. Nothing outlives the call, so
//! running twice over the same reports yields identical output.

pub mod grid;

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use coastwatch_hazard_models::{
    Hotspot, HotspotSummary, Report, ThreatLevel, check_coordinate, round_hundredths,
};

use crate::grid::{CellAggregate, CellKey};

/// Average severity at or above which a hotspot is [`ThreatLevel::High`].
pub const HIGH_THREAT_SEVERITY: f64 = 3.5;

/// Classifies a cell by its mean severity.
///
/// There is no low tier: cells too small to matter never reach
/// classification because of the `min_reports` filter.
#[must_use]
pub fn classify_threat(average_severity: f64) -> ThreatLevel {
    if average_severity >= HIGH_THREAT_SEVERITY {
        ThreatLevel::High
    } else {
        ThreatLevel::Medium
    }
}

/// Buckets recent reports into grid cells and ranks the busy ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotClusterer {
    grid_resolution_deg: f64,
    window: TimeDelta,
    min_reports: usize,
}

impl HotspotClusterer {
    /// Creates a clusterer.
    ///
    /// `grid_resolution_deg` must be positive and `min_reports` at least 1;
    /// `coastwatch_config` validates both before they get here.
    #[must_use]
    pub const fn new(grid_resolution_deg: f64, window: TimeDelta, min_reports: usize) -> Self {
        Self {
            grid_resolution_deg,
            window,
            min_reports,
        }
    }

    #[must_use]
    pub const fn grid_resolution_deg(&self) -> f64 {
        self.grid_resolution_deg
    }

    #[must_use]
    pub const fn window(&self) -> TimeDelta {
        self.window
    }

    #[must_use]
    pub const fn min_reports(&self) -> usize {
        self.min_reports
    }

    /// Returns a copy with a different window.
    #[must_use]
    pub const fn with_window(self, window: TimeDelta) -> Self {
        Self { window, ..self }
    }

    /// Returns a copy with a different minimum cell size.
    #[must_use]
    pub const fn with_min_reports(self, min_reports: usize) -> Self {
        Self {
            min_reports,
            ..self
        }
    }

    /// Computes ranked hotspots over `reports` inside the window ending at
    /// `now`.
    ///
    /// Empty input, or no cell reaching `min_reports`, yields an empty list.
    #[must_use]
    pub fn cluster(&self, reports: &[Report], now: DateTime<Utc>) -> Vec<Hotspot> {
        self.run(reports, now).0
    }

    /// Like [`Self::cluster`], wrapped with the number of reports that were
    /// inside the window and the window length.
    ///
    /// `total_reports` counts every in-window report, including ones left
    /// out of the grid for an invalid coordinate.
    #[must_use]
    pub fn summarize(&self, reports: &[Report], now: DateTime<Utc>) -> HotspotSummary {
        let (hotspots, total_reports) = self.run(reports, now);
        HotspotSummary {
            hotspots,
            total_reports,
            time_range_hours: self.window.num_hours(),
        }
    }

    fn run(&self, reports: &[Report], now: DateTime<Utc>) -> (Vec<Hotspot>, usize) {
        let (cells, recent) = self.accumulate(reports, now);
        let touched = cells.len();
        let hotspots = self.finalize(cells);

        log::debug!(
            "Clustered {recent} recent report(s) into {touched} cell(s), {} hotspot(s)",
            hotspots.len()
        );

        (hotspots, recent)
    }

    /// Buckets in-window reports, returning cells in first-seen order and
    /// the number of in-window reports, including any skipped for an
    /// invalid coordinate.
    fn accumulate(&self, reports: &[Report], now: DateTime<Utc>) -> (Vec<CellAggregate>, usize) {
        let mut index: BTreeMap<CellKey, usize> = BTreeMap::new();
        let mut cells: Vec<CellAggregate> = Vec::new();
        let mut recent = 0_usize;

        for report in reports {
            if now - report.timestamp > self.window {
                continue;
            }
            recent += 1;
            if let Err(e) = check_coordinate(report.latitude, report.longitude) {
                log::warn!("Skipping report {} in clustering: {e}", report.id);
                continue;
            }

            let key =
                CellKey::for_coordinate(report.latitude, report.longitude, self.grid_resolution_deg);
            let slot = *index.entry(key).or_insert_with(|| {
                cells.push(CellAggregate::new(key));
                cells.len() - 1
            });
            cells[slot].add(report);
        }

        (cells, recent)
    }

    fn finalize(&self, cells: Vec<CellAggregate>) -> Vec<Hotspot> {
        let mut hotspots: Vec<Hotspot> = cells
            .into_iter()
            .filter(|cell| cell.report_count() >= self.min_reports)
            .map(|cell| {
                let mean = cell.mean_severity();
                let (center_lat, center_lon) = cell.key.center(self.grid_resolution_deg);
                Hotspot {
                    center_lat,
                    center_lon,
                    report_count: cell.report_count(),
                    average_severity: round_hundredths(mean),
                    hazard_types: cell.hazard_types,
                    threat_level: classify_threat(mean),
                    report_ids: cell.members,
                }
            })
            .collect();

        // Stable: equal ranks keep first-seen cell order.
        hotspots.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
        hotspots
    }
}

impl Default for HotspotClusterer {
    /// 0.1 degree cells, 24 hour window, at least 3 reports.
    fn default() -> Self {
        Self::new(0.1, TimeDelta::hours(24), 3)
    }
}
