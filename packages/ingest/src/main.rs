#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the coastal hazard report tool.

use std::path::{Path, PathBuf};

use chrono::{TimeDelta, Utc};
use clap::{Parser, Subcommand};
use coastwatch_analytics::{dashboard, filters};
use coastwatch_analytics_models::{ActiveReportsParams, ReportFilterParams};
use coastwatch_config::{CoreConfig, default_config, load_config};
use coastwatch_hazard_models::{HazardType, VerificationStatus};
use coastwatch_ingest::{ReportIngestor, components, snapshot};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "coastwatch", about = "Coastal hazard report scoring and hotspot tool")]
struct Cli {
    /// TOML config file (defaults to the built-in Indian coastline config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one submission against a snapshot of existing reports
    Score {
        /// JSON file holding the submission
        #[arg(long)]
        report: PathBuf,
        /// JSON array of existing reports
        #[arg(long)]
        reports: PathBuf,
    },
    /// Cluster recent reports into ranked hotspots
    Hotspots {
        /// JSON array of reports
        #[arg(long)]
        reports: PathBuf,
        /// Override the clustering window
        #[arg(long)]
        window_hours: Option<i64>,
        /// Override the minimum reports per hotspot
        #[arg(long)]
        min_reports: Option<usize>,
    },
    /// Print dashboard statistics
    Stats {
        /// JSON array of reports
        #[arg(long)]
        reports: PathBuf,
    },
    /// List active reports, highest priority first
    Active {
        /// JSON array of reports
        #[arg(long)]
        reports: PathBuf,
        /// Look-back window in hours (default: 24)
        #[arg(long)]
        hours: Option<i64>,
        /// Minimum severity (1-5)
        #[arg(long)]
        min_severity: Option<u8>,
        /// Review state (`pending`, `verified` or `rejected`)
        #[arg(long)]
        status: Option<String>,
    },
    /// Filter reports by date, place, hazard, severity and review state
    Filter {
        /// JSON array of reports
        #[arg(long)]
        reports: PathBuf,
        /// Earliest timestamp (e.g., "2024-11-01" or RFC 3339)
        #[arg(long)]
        start: Option<String>,
        /// Latest timestamp
        #[arg(long)]
        end: Option<String>,
        /// Case-insensitive substring of the location name
        #[arg(long)]
        location: Option<String>,
        /// Hazard type (e.g., `storm_surge`)
        #[arg(long)]
        hazard: Option<String>,
        /// Minimum severity (1-5)
        #[arg(long)]
        min_severity: Option<u8>,
        /// Review state
        #[arg(long)]
        status: Option<String>,
    },
    /// Check whether a coordinate is inside the service area
    CheckLocation {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Print the hazard weight table
    Weights,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_status(status: Option<String>) -> Result<Option<VerificationStatus>, String> {
    status
        .map(|s| {
            s.parse::<VerificationStatus>()
                .map_err(|e| format!("Unknown verification status '{s}': {e}"))
        })
        .transpose()
}

fn load(path: Option<&Path>) -> Result<CoreConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => load_config(path)?,
        None => default_config(),
    })
}

#[allow(clippy::too_many_lines)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = load(cli.config.as_deref())?;
    let now = Utc::now();

    match cli.command {
        Commands::Score { report, reports } => {
            let ingestor = ReportIngestor::from_config(&config)?;
            let submission = snapshot::load_submission(&report)?;
            let existing = snapshot::load_reports(&reports)?;
            let scored = ingestor.ingest(submission, &existing, now)?;
            print_json(&scored)?;
        }
        Commands::Hotspots {
            reports,
            window_hours,
            min_reports,
        } => {
            let mut clusterer = components::hotspot_clusterer(&config)?;
            if let Some(hours) = window_hours {
                let window = TimeDelta::try_hours(hours)
                    .filter(|w| *w > TimeDelta::zero())
                    .ok_or_else(|| format!("Invalid window: {hours} hours"))?;
                clusterer = clusterer.with_window(window);
            }
            if let Some(min_reports) = min_reports {
                if min_reports == 0 {
                    return Err("--min-reports must be at least 1".into());
                }
                clusterer = clusterer.with_min_reports(min_reports);
            }
            let reports = snapshot::load_reports(&reports)?;
            let summary = clusterer.summarize(&reports, now);
            log::info!(
                "{} hotspot(s) from {} report(s) in the last {}h",
                summary.hotspots.len(),
                summary.total_reports,
                summary.time_range_hours
            );
            print_json(&summary)?;
        }
        Commands::Stats { reports } => {
            let options = components::dashboard_options(&config)?;
            let clusterer = components::hotspot_clusterer(&config)?;
            let reports = snapshot::load_reports(&reports)?;
            let stats = dashboard::dashboard_stats(&reports, now, &options, &clusterer);
            print_json(&stats)?;
        }
        Commands::Active {
            reports,
            hours,
            min_severity,
            status,
        } => {
            let params = ActiveReportsParams {
                hours,
                min_severity,
                verification_status: parse_status(status)?,
            };
            let reports = snapshot::load_reports(&reports)?;
            let active = filters::active_reports(&reports, now, &params)?;
            print_json(&active)?;
        }
        Commands::Filter {
            reports,
            start,
            end,
            location,
            hazard,
            min_severity,
            status,
        } => {
            let hazard_type = hazard
                .map(|h| {
                    h.parse::<HazardType>()
                        .map_err(|e| format!("Unknown hazard type '{h}': {e}"))
                })
                .transpose()?;
            let params = ReportFilterParams {
                start_date: start,
                end_date: end,
                location,
                hazard_type,
                min_severity,
                verification_status: parse_status(status)?,
            };
            let reports = snapshot::load_reports(&reports)?;
            let matched = filters::filter_reports(&reports, &params)?;
            print_json(&matched)?;
        }
        Commands::CheckLocation {
            latitude,
            longitude,
        } => {
            let area = components::service_area(&config);
            if area.is_within_service_area(latitude, longitude) {
                println!("({latitude}, {longitude}) is inside the service area");
            } else {
                println!("({latitude}, {longitude}) is outside the service area");
                std::process::exit(1);
            }
        }
        Commands::Weights => {
            let scorer = components::priority_scorer(&config);
            println!("{:<16} WEIGHT", "HAZARD");
            println!("{}", "-".repeat(24));
            for (hazard, weight) in scorer.weights() {
                let name: &str = hazard.as_ref();
                println!("{name:<16} {weight:.1}");
            }
            println!("{}", "-".repeat(24));
            println!("{:<16} {:.1}", "max score", scorer.max_score());
        }
    }

    Ok(())
}
