#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Spatial checks run on every incoming hazard report.
//!
//! [`ServiceArea`] rejects submissions outside the monitored coastline
//! before any other work happens, and [`GeoIndex`] finds the recent
//! reports within a geodesic radius of a new submission. Both are plain
//! values with no interior state and can be shared freely across threads.

mod nearby;
mod service_area;

pub use nearby::GeoIndex;
pub use service_area::ServiceArea;

use geo::{Distance, Geodesic, Point};

/// Ellipsoidal (WGS84) geodesic distance between two coordinates, in
/// kilometers.
///
/// Coordinates are given latitude first; callers are expected to have
/// validated them.
#[must_use]
pub fn distance_km(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> f64 {
    let from = Point::new(from_lon, from_lat);
    let to = Point::new(to_lon, to_lat);
    Geodesic.distance(from, to) / 1000.0
}
