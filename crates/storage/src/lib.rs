//! Storage Layer
//!
//! In-memory fleet repository. Supplies read-only snapshots to the scheduler
//! and enforces edit-boundary rules (unique plates, odometer monotonicity,
//! maintenance lifecycle) on writes.

mod repository;
mod snapshot;

pub use repository::{
    FleetRepository, MaintenanceCounts, MaintenanceFilter, NewMaintenance, VehicleFilter,
};
pub use snapshot::FleetSnapshot;

use data_validator::ValidationError;
use fleet_model::{MaintenanceState, RecordId};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Repository lock poisoned: {0}")]
    LockPoisoned(String),
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },
    #[error("{entity} {key} already exists")]
    Duplicate { entity: &'static str, key: String },
    #[error("Maintenance {id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        id: RecordId,
        from: MaintenanceState,
        to: MaintenanceState,
    },
    #[error("Maintenance id space exhausted")]
    IdExhausted,
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StorageError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub(crate) fn duplicate(entity: &'static str, key: impl ToString) -> Self {
        StorageError::Duplicate {
            entity,
            key: key.to_string(),
        }
    }
}
