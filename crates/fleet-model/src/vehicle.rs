//! Vehicle records

use serde::{Deserialize, Serialize};

use crate::RecordId;

/// Current usability of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalStatus {
    Operational,
    InMaintenance,
    OutOfService,
}

/// Load class of a vehicle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityType {
    /// Large capacity (GC)
    Large,
    /// Medium capacity (MC)
    #[default]
    Medium,
}

/// A fleet vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique plate, e.g. `AB-1234`
    pub plate: String,
    pub brand: String,
    pub model: String,
    /// Year of manufacture
    pub year: i32,
    #[serde(default)]
    pub capacity: CapacityType,
    /// Operational center the vehicle belongs to
    pub center_id: RecordId,
    /// Odometer reading in km
    pub current_mileage: i64,
    pub status: OperationalStatus,
}

impl Vehicle {
    /// Create an operational vehicle with the given odometer reading
    pub fn new(plate: impl Into<String>, center_id: RecordId, current_mileage: i64) -> Self {
        Self {
            plate: plate.into(),
            brand: String::new(),
            model: String::new(),
            year: 2020,
            capacity: CapacityType::default(),
            center_id,
            current_mileage,
            status: OperationalStatus::Operational,
        }
    }

    /// Builder-style status override
    pub fn with_status(mut self, status: OperationalStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the vehicle is in service
    pub fn is_operational(&self) -> bool {
        self.status == OperationalStatus::Operational
    }
}
