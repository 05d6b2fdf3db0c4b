//! Alert Derivation Pipeline

use chrono::NaiveDate;
use fleet_model::{MaintenanceRecord, MaintenanceState, RecordId, Vehicle};
use maintenance_scheduler::{MaintenanceScheduler, SchedulerError, Urgency};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What triggered an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum AlertKind {
    /// Next preventive service is close
    MileageDue { remaining_km: i64 },
    /// A maintenance job is in progress
    InProgress {
        record_id: RecordId,
        scheduled_date: NaiveDate,
    },
}

impl AlertKind {
    /// Category label
    pub fn category(&self) -> &'static str {
        match self {
            AlertKind::MileageDue { .. } => "mileage_due",
            AlertKind::InProgress { .. } => "in_progress",
        }
    }
}

/// Derived operator notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Plate of the affected vehicle
    pub vehicle: String,
    #[serde(flatten)]
    pub kind: AlertKind,
    /// Never `Urgency::None`
    pub level: Urgency,
    pub message: String,
}

impl Alert {
    fn mileage_due(vehicle: &Vehicle, remaining_km: i64, level: Urgency) -> Self {
        Self {
            vehicle: vehicle.plate.clone(),
            kind: AlertKind::MileageDue { remaining_km },
            level,
            message: format!("Maintenance due in {} km", remaining_km),
        }
    }

    fn in_progress(record: &MaintenanceRecord) -> Self {
        Self {
            vehicle: record.vehicle.clone(),
            kind: AlertKind::InProgress {
                record_id: record.id,
                scheduled_date: record.scheduled_date,
            },
            level: Urgency::Medium,
            message: format!("Maintenance in progress since {}", record.scheduled_date),
        }
    }

    /// Remaining distance for mileage alerts
    pub fn remaining_km(&self) -> Option<i64> {
        match self.kind {
            AlertKind::MileageDue { remaining_km } => Some(remaining_km),
            AlertKind::InProgress { .. } => None,
        }
    }
}

fn mileage_alert(
    scheduler: &MaintenanceScheduler,
    vehicle: &Vehicle,
) -> Result<Option<Alert>, SchedulerError> {
    let remaining_km = scheduler.remaining(vehicle.current_mileage)?;
    let level = scheduler.classify(remaining_km);
    Ok(level
        .is_alert()
        .then(|| Alert::mileage_due(vehicle, remaining_km, level)))
}

/// Derive the fleet's alerts.
///
/// Operational vehicles whose remaining distance falls in an urgency band
/// yield one mileage alert each; vehicles in any other status are skipped.
/// Every in-progress maintenance record yields a medium alert based on its
/// state alone, regardless of how long it has been open. Mileage alerts come
/// first, then in-progress alerts, each in input order; a vehicle may appear
/// in both. `level` keeps only alerts of that exact level.
pub fn derive_fleet_alerts(
    scheduler: &MaintenanceScheduler,
    vehicles: &[Vehicle],
    records: &[MaintenanceRecord],
    level: Option<Urgency>,
) -> Result<Vec<Alert>, SchedulerError> {
    let mileage_alerts = vehicles
        .iter()
        .filter(|vehicle| vehicle.is_operational())
        .filter_map(|vehicle| mileage_alert(scheduler, vehicle).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    let in_progress_alerts = records
        .iter()
        .filter(|record| record.state == MaintenanceState::InProgress)
        .map(Alert::in_progress);

    let alerts: Vec<Alert> = mileage_alerts
        .into_iter()
        .chain(in_progress_alerts)
        .filter(|alert| level.map_or(true, |wanted| alert.level == wanted))
        .collect();

    debug!(
        "Derived {} alerts from {} vehicles and {} records (filter: {:?})",
        alerts.len(),
        vehicles.len(),
        records.len(),
        level
    );
    Ok(alerts)
}

/// Number of operational vehicles within the widest urgency band
pub fn count_vehicles_needing_attention(
    scheduler: &MaintenanceScheduler,
    vehicles: &[Vehicle],
) -> Result<usize, SchedulerError> {
    let limit = scheduler.policy().thresholds.medium_km;
    let count = vehicles
        .iter()
        .filter(|v| v.is_operational())
        .map(|v| scheduler.remaining(v.current_mileage))
        .try_fold(0usize, |count, remaining| {
            remaining.map(|km| if km <= limit { count + 1 } else { count })
        })?;
    info!("{} operational vehicles need maintenance attention", count);
    Ok(count)
}
