#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard statistics and report queries over in-memory hazard reports.
//!
//! Each public function answers one dashboard question from a report
//! snapshot supplied by the caller. None of them mutate the reports or
//! keep state between calls.

pub mod dashboard;
pub mod filters;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A query parameter could not be interpreted.
    #[error("Query error: {message}")]
    Query {
        /// Description of what went wrong.
        message: String,
    },
}
