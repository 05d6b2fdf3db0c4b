//! Maintenance records and definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::RecordId;

/// Lifecycle state of a maintenance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceState {
    Scheduled,
    InProgress,
    Completed,
    Canceled,
}

impl MaintenanceState {
    /// Scheduled or in progress
    pub fn is_active(self) -> bool {
        matches!(self, MaintenanceState::Scheduled | MaintenanceState::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceKind {
    Preventive,
    Corrective,
}

/// Operator-assigned priority of a maintenance job
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Catalogue entry describing a kind of service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceType {
    pub id: RecordId,
    pub name: String,
    /// Recommended distance between services (km)
    pub frequency_km: i64,
    /// Estimated cost (CLP)
    pub estimated_cost: i64,
    pub estimated_hours: u32,
    pub preventive: bool,
}

/// A programmed maintenance job for one vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: RecordId,
    /// Plate of the serviced vehicle
    pub vehicle: String,
    pub maintenance_type_id: RecordId,
    pub provider_id: RecordId,
    pub kind: MaintenanceKind,
    pub state: MaintenanceState,
    pub priority: Priority,
    pub scheduled_date: NaiveDate,
    /// Set when the job is completed
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    /// Odometer reading the job was programmed at
    pub scheduled_mileage: i64,
    pub estimated_cost: i64,
    #[serde(default)]
    pub actual_cost: Option<i64>,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states() {
        assert!(MaintenanceState::Scheduled.is_active());
        assert!(MaintenanceState::InProgress.is_active());
        assert!(!MaintenanceState::Completed.is_active());
        assert!(!MaintenanceState::Canceled.is_active());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::Medium > Priority::Low);
    }
}
