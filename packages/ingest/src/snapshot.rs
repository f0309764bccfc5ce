//! JSON report files.
//!
//! A snapshot file is a JSON array of stored reports as exported by the
//! report store. A submission file is a single JSON object.

use std::path::Path;

use coastwatch_hazard_models::{Report, ReportSubmission};

use crate::IngestError;

/// Reads a report snapshot.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or is not a JSON
/// array of reports.
pub fn load_reports(path: &Path) -> Result<Vec<Report>, IngestError> {
    let contents = std::fs::read_to_string(path)?;
    let reports = parse_reports(&contents)?;
    log::info!("Loaded {} report(s) from {}", reports.len(), path.display());
    Ok(reports)
}

/// Parses a report snapshot from a JSON string.
///
/// # Errors
///
/// Returns [`IngestError::Json`] if the JSON is malformed or a report has
/// an unknown hazard type or out-of-range severity.
pub fn parse_reports(json: &str) -> Result<Vec<Report>, IngestError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads one submission.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or is not a valid
/// submission object.
pub fn load_submission(path: &Path) -> Result<ReportSubmission, IngestError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coastwatch_hazard_models::{HazardType, Severity, VerificationStatus};

    #[test]
    fn parses_store_export() {
        let reports = parse_reports(
            r#"[
                {
                    "id": "r1",
                    "userId": "u1",
                    "latitude": 13.08,
                    "longitude": 80.27,
                    "locationName": "Marina Beach",
                    "hazardType": "storm_surge",
                    "severity": 4,
                    "description": "Water over the promenade",
                    "timestamp": "2024-11-30T11:00:00Z",
                    "verificationStatus": "verified",
                    "priorityScore": 3.6
                },
                {
                    "id": "r2",
                    "userId": "u2",
                    "latitude": 13.09,
                    "longitude": 80.28,
                    "hazardType": "high_waves",
                    "severity": 2,
                    "timestamp": "2024-11-30T11:30:00+05:30"
                }
            ]"#,
        )
        .unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].hazard_type, HazardType::StormSurge);
        assert_eq!(reports[0].verification_status, VerificationStatus::Verified);
        assert_eq!(reports[1].severity, Severity::Low);
        assert_eq!(reports[1].verification_status, VerificationStatus::Pending);
        assert!(reports[1].corroborators.is_empty());
    }

    #[test]
    fn rejects_out_of_range_severity() {
        let result = parse_reports(
            r#"[{"id": "r1", "userId": "u1", "latitude": 13.08, "longitude": 80.27,
                 "hazardType": "cyclone", "severity": 9, "timestamp": "2024-11-30T11:00:00Z"}]"#,
        );
        assert!(matches!(result, Err(IngestError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_reports(Path::new("/nonexistent/coastwatch/reports.json"));
        assert!(matches!(result, Err(IngestError::Io(_))));
    }
}
