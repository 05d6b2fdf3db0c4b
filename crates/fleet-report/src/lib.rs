//! Fleet Maintenance Report
//!
//! Loads a fleet snapshot, derives maintenance alerts and forecasts, and
//! summarizes fleet and per-center availability.

mod dashboard;
mod report;
mod settings;

pub use dashboard::{CenterStats, FleetOverview, StatusCounts};
pub use report::{build_report, Report, VehicleForecast};
pub use settings::ReportConfig;

use anyhow::Context;
use data_validator::Validator;
use maintenance_scheduler::MaintenanceScheduler;
use storage::{FleetRepository, FleetSnapshot};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Parse a `tracing` level name such as `info` or `DEBUG`
pub fn parse_level(level: &str) -> anyhow::Result<Level> {
    level
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid log level '{}'", level))
}

/// Initialize logging on stderr so stdout carries only the report
pub fn init_logging(level: &str, json: bool) -> anyhow::Result<()> {
    let level = parse_level(level)?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.context("Failed to set tracing subscriber")
}

/// Load the configured snapshot and build its report
pub fn run(config: &ReportConfig) -> anyhow::Result<Report> {
    let scheduler =
        MaintenanceScheduler::new(config.policy).context("Invalid maintenance policy")?;

    let snapshot = FleetSnapshot::load(&config.snapshot_path).with_context(|| {
        format!("Failed to read snapshot {}", config.snapshot_path.display())
    })?;
    let repo = FleetRepository::from_snapshot_with_validator(
        snapshot,
        Validator::new(config.validation.clone()),
    )
    .context("Snapshot contains invalid records")?;

    info!("Building report from {}", config.snapshot_path.display());
    build_report(&repo, &scheduler, config.alert_level)
}
