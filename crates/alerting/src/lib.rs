//! Fleet Alerting
//!
//! Derives maintenance alerts from a snapshot of the fleet: mileage-based
//! alerts for operational vehicles close to their next service, and alerts
//! for maintenance jobs currently in progress. Alerts are recomputed on every
//! query and never stored.

mod pipeline;
mod summary;

pub use pipeline::{count_vehicles_needing_attention, derive_fleet_alerts, Alert, AlertKind};
pub use summary::AlertSummary;
