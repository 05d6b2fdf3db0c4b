//! Report settings

use config::{Config, ConfigError, Environment, File};
use data_validator::ValidationConfig;
use maintenance_scheduler::{MaintenancePolicy, Urgency};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one report run.
///
/// Loaded from an optional file, then overridden by `FLEET__*` environment
/// variables (`FLEET__POLICY__INTERVAL_KM=15000`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Fleet snapshot to read
    pub snapshot_path: PathBuf,
    /// Tracing level filter
    pub log_level: String,
    /// Emit logs as JSON lines
    pub json_logs: bool,
    /// Keep only alerts of this level
    pub alert_level: Option<Urgency>,
    pub policy: MaintenancePolicy,
    pub validation: ValidationConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("fleet.json"),
            log_level: "info".to_string(),
            json_logs: false,
            alert_level: None,
            policy: MaintenancePolicy::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Load settings; a given file must exist
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(
                Environment::with_prefix("FLEET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
