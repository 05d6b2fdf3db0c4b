//! Preventive Maintenance Scheduler
//!
//! Computes when a vehicle's next preventive service is due from its odometer
//! reading and a fixed interval policy, and classifies how urgent it is.
//! Every operation is a pure function of its inputs.

mod error;
mod policy;
mod scheduler;

pub use error::SchedulerError;
pub use policy::{MaintenancePolicy, Urgency, UrgencyThresholds};
pub use policy::{DEFAULT_DUE_SOON_KM, DEFAULT_INTERVAL_KM};
pub use scheduler::{
    classify_urgency, is_maintenance_due_soon, next_maintenance_threshold,
    operational_availability, remaining_distance, MaintenanceForecast, MaintenanceScheduler,
};
