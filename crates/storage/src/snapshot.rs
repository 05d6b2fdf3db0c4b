//! JSON Fleet Snapshots

use crate::StorageError;
use fleet_model::{MaintenanceRecord, MaintenanceType, OperationalCenter, Provider, Vehicle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Point-in-time copy of every fleet table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetSnapshot {
    pub centers: Vec<OperationalCenter>,
    pub maintenance_types: Vec<MaintenanceType>,
    pub providers: Vec<Provider>,
    pub vehicles: Vec<Vehicle>,
    pub maintenance: Vec<MaintenanceRecord>,
}

impl FleetSnapshot {
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Read a snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        debug!("Reading fleet snapshot from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Write a snapshot file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
