//! Operational centers and maintenance providers

use serde::{Deserialize, Serialize};

use crate::RecordId;

/// A depot that vehicles are assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalCenter {
    pub id: RecordId,
    pub name: String,
    pub city: String,
    /// Maximum number of vehicles the center can hold
    pub max_capacity: u32,
    pub active: bool,
}

impl OperationalCenter {
    /// Create an active center
    pub fn new(id: RecordId, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            max_capacity: 20,
            active: true,
        }
    }
}

/// Workshop that performs maintenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: RecordId,
    pub name: String,
    /// Tax identifier (RUT)
    pub tax_id: String,
    pub specialty: String,
    pub active: bool,
}
