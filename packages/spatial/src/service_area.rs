//! Bounding-box gate for incoming submissions.

use serde::{Deserialize, Serialize};

/// Inclusive geographic bounding box within which submissions are
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceArea {
    /// Southern latitude boundary.
    pub min_lat: f64,
    /// Northern latitude boundary.
    pub max_lat: f64,
    /// Western longitude boundary.
    pub min_lon: f64,
    /// Eastern longitude boundary.
    pub max_lon: f64,
}

impl ServiceArea {
    /// Creates a new service area from the given bounds.
    #[must_use]
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Whether a coordinate lies inside the area, bounds included.
    ///
    /// Fails closed: NaN or infinite components are never inside.
    #[must_use]
    pub fn is_within_service_area(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }
}

impl Default for ServiceArea {
    /// Indian coastline.
    fn default() -> Self {
        Self::new(8.0, 23.5, 68.0, 97.5)
    }
}
