//! Fixed-resolution grid cells and the per-cell aggregate built while
//! bucketing reports.

use std::collections::BTreeSet;

use coastwatch_hazard_models::{HazardType, Report, ReportId};

/// Quantized cell coordinates, as integer multiples of the grid
/// resolution.
///
/// Two reports share a cell iff both indices match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    /// `round(latitude / resolution)`.
    pub lat_index: i64,
    /// `round(longitude / resolution)`.
    pub lon_index: i64,
}

impl CellKey {
    /// Quantizes a coordinate, rounding half away from zero on
    /// `coordinate / resolution` for both axes.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn for_coordinate(latitude: f64, longitude: f64, resolution: f64) -> Self {
        Self {
            lat_index: (latitude / resolution).round() as i64,
            lon_index: (longitude / resolution).round() as i64,
        }
    }

    /// Cell center in degrees as `(latitude, longitude)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn center(self, resolution: f64) -> (f64, f64) {
        (
            self.lat_index as f64 * resolution,
            self.lon_index as f64 * resolution,
        )
    }
}

/// Running totals for one cell during a single clustering run.
#[derive(Debug, Clone)]
pub struct CellAggregate {
    /// Cell these totals belong to.
    pub key: CellKey,
    /// Member report ids in bucketing order.
    pub members: Vec<ReportId>,
    /// Sum of member severities.
    pub total_severity: u32,
    /// Distinct hazard types among members.
    pub hazard_types: BTreeSet<HazardType>,
}

impl CellAggregate {
    /// Starts an empty aggregate for `key`.
    #[must_use]
    pub const fn new(key: CellKey) -> Self {
        Self {
            key,
            members: Vec::new(),
            total_severity: 0,
            hazard_types: BTreeSet::new(),
        }
    }

    /// Adds one report to the cell.
    pub fn add(&mut self, report: &Report) {
        self.members.push(report.id.clone());
        self.total_severity += u32::from(report.severity.value());
        self.hazard_types.insert(report.hazard_type);
    }

    /// Number of member reports.
    #[must_use]
    pub fn report_count(&self) -> usize {
        self.members.len()
    }

    /// Unrounded mean severity.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_severity(&self) -> f64 {
        if self.members.is_empty() {
            0.0
        } else {
            f64::from(self.total_severity) / self.members.len() as f64
        }
    }
}
