//! Fleet and per-center availability

use fleet_model::{CapacityType, OperationalCenter, OperationalStatus, RecordId, Vehicle};
use maintenance_scheduler::operational_availability;
use serde::Serialize;

/// Vehicle totals per operational status
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub operational: usize,
    pub in_maintenance: usize,
    pub out_of_service: usize,
    /// Operational share, percent with one decimal
    pub availability: f64,
}

impl StatusCounts {
    fn from_vehicles<'a>(vehicles: impl Iterator<Item = &'a Vehicle>) -> Self {
        let mut counts = vehicles.fold(Self::default(), |mut counts, vehicle| {
            counts.total += 1;
            match vehicle.status {
                OperationalStatus::Operational => counts.operational += 1,
                OperationalStatus::InMaintenance => counts.in_maintenance += 1,
                OperationalStatus::OutOfService => counts.out_of_service += 1,
            }
            counts
        });
        counts.availability = operational_availability(counts.total, counts.operational);
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterStats {
    pub center_id: RecordId,
    pub name: String,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

/// Dashboard view of the whole fleet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetOverview {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub large_capacity: usize,
    pub medium_capacity: usize,
    /// One entry per center, in center order
    pub centers: Vec<CenterStats>,
}

impl FleetOverview {
    pub fn build(centers: &[OperationalCenter], vehicles: &[Vehicle]) -> Self {
        let centers = centers
            .iter()
            .map(|center| CenterStats {
                center_id: center.id,
                name: center.name.clone(),
                counts: StatusCounts::from_vehicles(
                    vehicles.iter().filter(|v| v.center_id == center.id),
                ),
            })
            .collect();

        Self {
            counts: StatusCounts::from_vehicles(vehicles.iter()),
            large_capacity: vehicles
                .iter()
                .filter(|v| v.capacity == CapacityType::Large)
                .count(),
            medium_capacity: vehicles
                .iter()
                .filter(|v| v.capacity == CapacityType::Medium)
                .count(),
            centers,
        }
    }
}
