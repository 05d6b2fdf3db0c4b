//! Fleet Data Model
//!
//! Immutable value types shared by the scheduler, the alert pipeline and the
//! repository. Vehicles are identified by their plate.

mod center;
mod maintenance;
mod vehicle;

pub use center::{OperationalCenter, Provider};
pub use maintenance::{
    MaintenanceKind, MaintenanceRecord, MaintenanceState, MaintenanceType, Priority,
};
pub use vehicle::{CapacityType, OperationalStatus, Vehicle};

/// Record identifier assigned by the repository
pub type RecordId = i64;
