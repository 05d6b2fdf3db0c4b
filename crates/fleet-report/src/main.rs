//! Fleet Report - Main Entry Point

use anyhow::Context;
use fleet_report::{init_logging, run, ReportConfig};
use std::path::PathBuf;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ReportConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.log_level, config.json_logs)?;

    info!("=== Fleet Report v{} ===", env!("CARGO_PKG_VERSION"));

    let report = run(&config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
