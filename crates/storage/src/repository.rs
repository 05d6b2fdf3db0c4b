//! Repository Implementation

use crate::{FleetSnapshot, StorageError};
use chrono::NaiveDate;
use data_validator::Validator;
use fleet_model::{
    CapacityType, MaintenanceKind, MaintenanceRecord, MaintenanceState, MaintenanceType,
    OperationalCenter, OperationalStatus, Priority, Provider, RecordId, Vehicle,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Optional vehicle list filters; `None` matches everything
#[derive(Debug, Clone, Default)]
pub struct VehicleFilter {
    pub center_id: Option<RecordId>,
    pub capacity: Option<CapacityType>,
    pub status: Option<OperationalStatus>,
}

impl VehicleFilter {
    fn matches(&self, vehicle: &Vehicle) -> bool {
        self.center_id.map_or(true, |id| vehicle.center_id == id)
            && self.capacity.map_or(true, |c| vehicle.capacity == c)
            && self.status.map_or(true, |s| vehicle.status == s)
    }
}

/// Optional maintenance list filters
#[derive(Debug, Clone, Default)]
pub struct MaintenanceFilter {
    pub state: Option<MaintenanceState>,
    pub kind: Option<MaintenanceKind>,
    pub priority: Option<Priority>,
}

impl MaintenanceFilter {
    fn matches(&self, record: &MaintenanceRecord) -> bool {
        self.state.map_or(true, |s| record.state == s)
            && self.kind.map_or(true, |k| record.kind == k)
            && self.priority.map_or(true, |p| record.priority == p)
    }
}

/// Request to program a maintenance job
#[derive(Debug, Clone)]
pub struct NewMaintenance {
    pub vehicle: String,
    pub maintenance_type_id: RecordId,
    pub provider_id: RecordId,
    pub kind: MaintenanceKind,
    pub priority: Priority,
    pub scheduled_date: NaiveDate,
    /// Defaults to the vehicle's current reading
    pub scheduled_mileage: Option<i64>,
    pub estimated_cost: i64,
    pub description: String,
}

/// Maintenance totals per lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceCounts {
    pub total: usize,
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub canceled: usize,
}

#[derive(Debug, Default)]
struct Tables {
    centers: BTreeMap<RecordId, OperationalCenter>,
    maintenance_types: BTreeMap<RecordId, MaintenanceType>,
    providers: BTreeMap<RecordId, Provider>,
    /// Keyed by plate
    vehicles: BTreeMap<String, Vehicle>,
    maintenance: BTreeMap<RecordId, MaintenanceRecord>,
    next_maintenance_id: RecordId,
}

/// In-memory fleet repository
pub struct FleetRepository {
    tables: Mutex<Tables>,
    validator: Validator,
}

impl FleetRepository {
    /// Create an empty repository with default validation rules
    pub fn new() -> Self {
        Self::with_validator(Validator::default())
    }

    /// Create an empty repository with custom validation rules
    pub fn with_validator(validator: Validator) -> Self {
        info!("Creating in-memory fleet repository");
        Self {
            tables: Mutex::new(Tables {
                next_maintenance_id: 1,
                ..Default::default()
            }),
            validator,
        }
    }

    /// Build a repository from a snapshot, re-validating every record
    pub fn from_snapshot(snapshot: FleetSnapshot) -> Result<Self, StorageError> {
        Self::from_snapshot_with_validator(snapshot, Validator::default())
    }

    pub fn from_snapshot_with_validator(
        snapshot: FleetSnapshot,
        validator: Validator,
    ) -> Result<Self, StorageError> {
        let repo = Self::with_validator(validator);
        for center in snapshot.centers {
            repo.insert_center(center)?;
        }
        for maintenance_type in snapshot.maintenance_types {
            repo.insert_maintenance_type(maintenance_type)?;
        }
        for provider in snapshot.providers {
            repo.insert_provider(provider)?;
        }
        for vehicle in snapshot.vehicles {
            repo.insert_vehicle(vehicle)?;
        }
        for record in snapshot.maintenance {
            repo.restore_maintenance(record)?;
        }
        info!(
            "Loaded snapshot: {} vehicles, {} maintenance records",
            repo.vehicle_count()?,
            repo.maintenance_count()?
        );
        Ok(repo)
    }

    /// Copy of every table
    pub fn snapshot(&self) -> Result<FleetSnapshot, StorageError> {
        let tables = self.tables()?;
        Ok(FleetSnapshot {
            centers: tables.centers.values().cloned().collect(),
            maintenance_types: tables.maintenance_types.values().cloned().collect(),
            providers: tables.providers.values().cloned().collect(),
            vehicles: tables.vehicles.values().cloned().collect(),
            maintenance: tables.maintenance.values().cloned().collect(),
        })
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StorageError> {
        self.tables
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))
    }

    // --- Centers, catalogue, providers ---

    pub fn insert_center(&self, center: OperationalCenter) -> Result<(), StorageError> {
        let mut tables = self.tables()?;
        if tables.centers.contains_key(&center.id) {
            return Err(StorageError::duplicate("center", center.id));
        }
        debug!("Inserted center {} ({})", center.id, center.name);
        tables.centers.insert(center.id, center);
        Ok(())
    }

    pub fn centers(&self) -> Result<Vec<OperationalCenter>, StorageError> {
        Ok(self.tables()?.centers.values().cloned().collect())
    }

    pub fn insert_maintenance_type(&self, maintenance_type: MaintenanceType) -> Result<(), StorageError> {
        self.validator
            .validate_cost("estimated_cost", maintenance_type.estimated_cost)?;
        let mut tables = self.tables()?;
        if tables.maintenance_types.contains_key(&maintenance_type.id) {
            return Err(StorageError::duplicate("maintenance type", maintenance_type.id));
        }
        tables
            .maintenance_types
            .insert(maintenance_type.id, maintenance_type);
        Ok(())
    }

    pub fn insert_provider(&self, provider: Provider) -> Result<(), StorageError> {
        let mut tables = self.tables()?;
        if tables.providers.contains_key(&provider.id) {
            return Err(StorageError::duplicate("provider", provider.id));
        }
        tables.providers.insert(provider.id, provider);
        Ok(())
    }

    // --- Vehicles ---

    /// Register a vehicle. The plate is normalized to uppercase.
    pub fn insert_vehicle(&self, mut vehicle: Vehicle) -> Result<Vehicle, StorageError> {
        vehicle.plate = self.validator.validate_plate(&vehicle.plate)?;
        self.validator.validate_year_now(vehicle.year)?;
        self.validator.validate_mileage(vehicle.current_mileage)?;

        let mut tables = self.tables()?;
        if !tables.centers.contains_key(&vehicle.center_id) {
            return Err(StorageError::not_found("center", vehicle.center_id));
        }
        if tables.vehicles.contains_key(&vehicle.plate) {
            return Err(StorageError::duplicate("vehicle", &vehicle.plate));
        }

        info!("Registered vehicle {} at {} km", vehicle.plate, vehicle.current_mileage);
        tables.vehicles.insert(vehicle.plate.clone(), vehicle.clone());
        Ok(vehicle)
    }

    pub fn get_vehicle(&self, plate: &str) -> Result<Vehicle, StorageError> {
        let plate = plate.trim().to_uppercase();
        self.tables()?
            .vehicles
            .get(&plate)
            .cloned()
            .ok_or_else(|| StorageError::not_found("vehicle", plate))
    }

    /// Record a new odometer reading; readings never go backwards
    pub fn update_mileage(&self, plate: &str, new_mileage: i64) -> Result<Vehicle, StorageError> {
        self.modify_vehicle(plate, |validator, vehicle| {
            validator.validate_mileage_update(vehicle.current_mileage, new_mileage)?;
            info!(
                "Odometer for {} updated: {} -> {} km",
                vehicle.plate, vehicle.current_mileage, new_mileage
            );
            vehicle.current_mileage = new_mileage;
            Ok(())
        })
    }

    /// Change operational status; retiring a vehicle is `OutOfService`
    pub fn set_vehicle_status(
        &self,
        plate: &str,
        status: OperationalStatus,
    ) -> Result<Vehicle, StorageError> {
        self.modify_vehicle(plate, |_, vehicle| {
            debug!("Vehicle {} status {:?} -> {:?}", vehicle.plate, vehicle.status, status);
            vehicle.status = status;
            Ok(())
        })
    }

    fn modify_vehicle<F>(&self, plate: &str, apply: F) -> Result<Vehicle, StorageError>
    where
        F: FnOnce(&Validator, &mut Vehicle) -> Result<(), StorageError>,
    {
        let plate = plate.trim().to_uppercase();
        let mut tables = self.tables()?;
        let vehicle = tables
            .vehicles
            .get_mut(&plate)
            .ok_or_else(|| StorageError::not_found("vehicle", &plate))?;
        apply(&self.validator, vehicle)?;
        Ok(vehicle.clone())
    }

    /// Vehicles ordered by plate
    pub fn vehicles(&self, filter: &VehicleFilter) -> Result<Vec<Vehicle>, StorageError> {
        Ok(self
            .tables()?
            .vehicles
            .values()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect())
    }

    pub fn operational_vehicles(&self) -> Result<Vec<Vehicle>, StorageError> {
        self.vehicles(&VehicleFilter {
            status: Some(OperationalStatus::Operational),
            ..Default::default()
        })
    }

    pub fn vehicle_count(&self) -> Result<usize, StorageError> {
        Ok(self.tables()?.vehicles.len())
    }

    // --- Maintenance ---

    /// Program a maintenance job. Vehicle, type and provider must exist.
    pub fn schedule_maintenance(
        &self,
        request: NewMaintenance,
    ) -> Result<MaintenanceRecord, StorageError> {
        self.validator
            .validate_cost("estimated_cost", request.estimated_cost)?;

        let mut tables = self.tables()?;
        let plate = request.vehicle.trim().to_uppercase();
        let vehicle = tables
            .vehicles
            .get(&plate)
            .ok_or_else(|| StorageError::not_found("vehicle", &plate))?;
        let scheduled_mileage = request.scheduled_mileage.unwrap_or(vehicle.current_mileage);
        self.validator.validate_mileage(scheduled_mileage)?;

        if !tables.maintenance_types.contains_key(&request.maintenance_type_id) {
            return Err(StorageError::not_found(
                "maintenance type",
                request.maintenance_type_id,
            ));
        }
        if !tables.providers.contains_key(&request.provider_id) {
            return Err(StorageError::not_found("provider", request.provider_id));
        }

        let id = tables.next_maintenance_id;
        tables.next_maintenance_id = id.checked_add(1).ok_or(StorageError::IdExhausted)?;

        let record = MaintenanceRecord {
            id,
            vehicle: plate,
            maintenance_type_id: request.maintenance_type_id,
            provider_id: request.provider_id,
            kind: request.kind,
            state: MaintenanceState::Scheduled,
            priority: request.priority,
            scheduled_date: request.scheduled_date,
            completed_date: None,
            scheduled_mileage,
            estimated_cost: request.estimated_cost,
            actual_cost: None,
            description: request.description,
        };

        info!(
            "Scheduled maintenance {} for {} on {}",
            id, record.vehicle, record.scheduled_date
        );
        tables.maintenance.insert(id, record.clone());
        Ok(record)
    }

    /// Re-insert a stored record keeping its id and state
    fn restore_maintenance(&self, mut record: MaintenanceRecord) -> Result<(), StorageError> {
        record.vehicle = record.vehicle.trim().to_uppercase();
        self.validator.validate_completion(
            record.state,
            record.completed_date,
            record.actual_cost,
        )?;
        self.validator
            .validate_cost("estimated_cost", record.estimated_cost)?;

        let mut tables = self.tables()?;
        if !tables.vehicles.contains_key(&record.vehicle) {
            return Err(StorageError::not_found("vehicle", &record.vehicle));
        }
        if !tables.maintenance_types.contains_key(&record.maintenance_type_id) {
            return Err(StorageError::not_found(
                "maintenance type",
                record.maintenance_type_id,
            ));
        }
        if !tables.providers.contains_key(&record.provider_id) {
            return Err(StorageError::not_found("provider", record.provider_id));
        }
        if tables.maintenance.contains_key(&record.id) {
            return Err(StorageError::duplicate("maintenance", record.id));
        }

        let after = record.id.checked_add(1).ok_or(StorageError::IdExhausted)?;
        tables.next_maintenance_id = tables.next_maintenance_id.max(after);
        tables.maintenance.insert(record.id, record);
        Ok(())
    }

    pub fn get_maintenance(&self, id: RecordId) -> Result<MaintenanceRecord, StorageError> {
        self.tables()?
            .maintenance
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("maintenance", id))
    }

    fn transition<F>(
        &self,
        id: RecordId,
        to: MaintenanceState,
        apply: F,
    ) -> Result<MaintenanceRecord, StorageError>
    where
        F: FnOnce(&mut MaintenanceRecord),
    {
        let mut tables = self.tables()?;
        let record = tables
            .maintenance
            .get_mut(&id)
            .ok_or_else(|| StorageError::not_found("maintenance", id))?;

        let allowed = matches!(
            (record.state, to),
            (MaintenanceState::Scheduled, MaintenanceState::InProgress)
                | (MaintenanceState::InProgress, MaintenanceState::Completed)
                | (MaintenanceState::Scheduled, MaintenanceState::Canceled)
                | (MaintenanceState::InProgress, MaintenanceState::Canceled)
        );
        if !allowed {
            return Err(StorageError::InvalidTransition {
                id,
                from: record.state,
                to,
            });
        }

        debug!("Maintenance {} {:?} -> {:?}", id, record.state, to);
        record.state = to;
        apply(record);
        Ok(record.clone())
    }

    pub fn start_maintenance(&self, id: RecordId) -> Result<MaintenanceRecord, StorageError> {
        self.transition(id, MaintenanceState::InProgress, |_| {})
    }

    /// Close a job with its realization date and optional real cost
    pub fn complete_maintenance(
        &self,
        id: RecordId,
        completed_date: NaiveDate,
        actual_cost: Option<i64>,
    ) -> Result<MaintenanceRecord, StorageError> {
        self.validator.validate_completion(
            MaintenanceState::Completed,
            Some(completed_date),
            actual_cost,
        )?;
        self.transition(id, MaintenanceState::Completed, |record| {
            record.completed_date = Some(completed_date);
            record.actual_cost = actual_cost;
        })
    }

    pub fn cancel_maintenance(&self, id: RecordId) -> Result<MaintenanceRecord, StorageError> {
        self.transition(id, MaintenanceState::Canceled, |_| {})
    }

    pub fn delete_maintenance(&self, id: RecordId) -> Result<MaintenanceRecord, StorageError> {
        let record = self
            .tables()?
            .maintenance
            .remove(&id)
            .ok_or_else(|| StorageError::not_found("maintenance", id))?;
        warn!("Deleted maintenance {} for {}", id, record.vehicle);
        Ok(record)
    }

    /// Records newest scheduled date first
    pub fn maintenance_records(
        &self,
        filter: &MaintenanceFilter,
    ) -> Result<Vec<MaintenanceRecord>, StorageError> {
        let mut records: Vec<_> = self
            .tables()?
            .maintenance
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));
        Ok(records)
    }

    /// Scheduled and in-progress records
    pub fn active_maintenance(&self) -> Result<Vec<MaintenanceRecord>, StorageError> {
        Ok(self
            .tables()?
            .maintenance
            .values()
            .filter(|r| r.state.is_active())
            .cloned()
            .collect())
    }

    /// Most recent jobs of one vehicle
    pub fn maintenance_for_vehicle(
        &self,
        plate: &str,
        limit: usize,
    ) -> Result<Vec<MaintenanceRecord>, StorageError> {
        let plate = plate.trim().to_uppercase();
        let mut records: Vec<_> = self
            .tables()?
            .maintenance
            .values()
            .filter(|r| r.vehicle == plate)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));
        records.truncate(limit);
        Ok(records)
    }

    pub fn maintenance_counts(&self) -> Result<MaintenanceCounts, StorageError> {
        let tables = self.tables()?;
        Ok(tables
            .maintenance
            .values()
            .fold(MaintenanceCounts::default(), |mut counts, record| {
                counts.total += 1;
                match record.state {
                    MaintenanceState::Scheduled => counts.scheduled += 1,
                    MaintenanceState::InProgress => counts.in_progress += 1,
                    MaintenanceState::Completed => counts.completed += 1,
                    MaintenanceState::Canceled => counts.canceled += 1,
                }
                counts
            }))
    }

    pub fn maintenance_count(&self) -> Result<usize, StorageError> {
        Ok(self.tables()?.maintenance.len())
    }
}

impl Default for FleetRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_validator::ValidationError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded() -> FleetRepository {
        let repo = FleetRepository::new();
        repo.insert_center(OperationalCenter::new(1, "Santiago", "Santiago")).unwrap();
        repo.insert_center(OperationalCenter::new(2, "Osorno", "Osorno")).unwrap();
        repo.insert_maintenance_type(MaintenanceType {
            id: 1,
            name: "Cambio de aceite".to_string(),
            frequency_km: 10_000,
            estimated_cost: 120_000,
            estimated_hours: 2,
            preventive: true,
        })
        .unwrap();
        repo.insert_provider(Provider {
            id: 1,
            name: "Taller Central".to_string(),
            tax_id: "76.123.456-7".to_string(),
            specialty: "Motor".to_string(),
            active: true,
        })
        .unwrap();
        repo.insert_vehicle(Vehicle::new("ab-1234", 1, 145_000)).unwrap();
        repo.insert_vehicle(Vehicle::new("CD-5678", 2, 98_700)).unwrap();
        repo
    }

    fn request(plate: &str) -> NewMaintenance {
        NewMaintenance {
            vehicle: plate.to_string(),
            maintenance_type_id: 1,
            provider_id: 1,
            kind: MaintenanceKind::Preventive,
            priority: Priority::High,
            scheduled_date: date(2024, 6, 1),
            scheduled_mileage: None,
            estimated_cost: 120_000,
            description: "Servicio 150.000 km".to_string(),
        }
    }

    #[test]
    fn test_vehicle_insert_and_retrieve() {
        let repo = seeded();
        let vehicle = repo.get_vehicle("AB-1234").unwrap();
        assert_eq!(vehicle.plate, "AB-1234");
        assert_eq!(vehicle.current_mileage, 145_000);
        assert_eq!(repo.vehicle_count().unwrap(), 2);
    }

    #[test]
    fn test_vehicle_insert_rules() {
        let repo = seeded();
        assert!(matches!(
            repo.insert_vehicle(Vehicle::new("AB-1234", 1, 0)),
            Err(StorageError::Duplicate { .. })
        ));
        assert!(matches!(
            repo.insert_vehicle(Vehicle::new("ABC-12", 1, 0)),
            Err(StorageError::Validation(ValidationError::InvalidPlate(_)))
        ));
        assert!(matches!(
            repo.insert_vehicle(Vehicle::new("ZZ-0001", 9, 0)),
            Err(StorageError::NotFound { entity: "center", .. })
        ));
        assert!(matches!(
            repo.insert_vehicle(Vehicle::new("ZZ-0002", 1, -5)),
            Err(StorageError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_mileage_updates_are_monotonic() {
        let repo = seeded();
        let updated = repo.update_mileage("AB-1234", 149_600).unwrap();
        assert_eq!(updated.current_mileage, 149_600);

        let err = repo.update_mileage("AB-1234", 149_000).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Validation(ValidationError::MileageDecreased { .. })
        ));
        assert_eq!(repo.get_vehicle("AB-1234").unwrap().current_mileage, 149_600);

        assert!(matches!(
            repo.update_mileage("XX-0000", 10),
            Err(StorageError::NotFound { .. })
        ));
    }

    #[test]
    fn test_vehicle_filters() {
        let repo = seeded();
        repo.set_vehicle_status("CD-5678", OperationalStatus::InMaintenance)
            .unwrap();

        let operational = repo.operational_vehicles().unwrap();
        assert_eq!(operational.len(), 1);
        assert_eq!(operational[0].plate, "AB-1234");

        let osorno = repo
            .vehicles(&VehicleFilter {
                center_id: Some(2),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(osorno.len(), 1);
        assert_eq!(osorno[0].status, OperationalStatus::InMaintenance);
    }

    #[test]
    fn test_maintenance_lifecycle() {
        let repo = seeded();
        let record = repo.schedule_maintenance(request("ab-1234")).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.vehicle, "AB-1234");
        assert_eq!(record.state, MaintenanceState::Scheduled);
        assert_eq!(record.scheduled_mileage, 145_000);

        let started = repo.start_maintenance(record.id).unwrap();
        assert_eq!(started.state, MaintenanceState::InProgress);
        assert_eq!(repo.active_maintenance().unwrap().len(), 1);

        let done = repo
            .complete_maintenance(record.id, date(2024, 6, 2), Some(131_500))
            .unwrap();
        assert_eq!(done.state, MaintenanceState::Completed);
        assert_eq!(done.completed_date, Some(date(2024, 6, 2)));
        assert_eq!(done.actual_cost, Some(131_500));
        assert!(repo.active_maintenance().unwrap().is_empty());

        assert!(matches!(
            repo.cancel_maintenance(record.id),
            Err(StorageError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_cannot_complete_scheduled_job_directly() {
        let repo = seeded();
        let record = repo.schedule_maintenance(request("CD-5678")).unwrap();
        assert!(matches!(
            repo.complete_maintenance(record.id, date(2024, 6, 2), None),
            Err(StorageError::InvalidTransition {
                from: MaintenanceState::Scheduled,
                to: MaintenanceState::Completed,
                ..
            })
        ));
        assert_eq!(
            repo.cancel_maintenance(record.id).unwrap().state,
            MaintenanceState::Canceled
        );
    }

    #[test]
    fn test_schedule_requires_references() {
        let repo = seeded();
        assert!(matches!(
            repo.schedule_maintenance(request("EF-0000")),
            Err(StorageError::NotFound { entity: "vehicle", .. })
        ));
        assert!(matches!(
            repo.schedule_maintenance(NewMaintenance {
                provider_id: 42,
                ..request("AB-1234")
            }),
            Err(StorageError::NotFound { entity: "provider", .. })
        ));
        assert!(matches!(
            repo.schedule_maintenance(NewMaintenance {
                maintenance_type_id: 42,
                ..request("AB-1234")
            }),
            Err(StorageError::NotFound { entity: "maintenance type", .. })
        ));
    }

    #[test]
    fn test_history_and_counts() {
        let repo = seeded();
        for day in [3, 20, 11] {
            repo.schedule_maintenance(NewMaintenance {
                scheduled_date: date(2024, 7, day),
                ..request("AB-1234")
            })
            .unwrap();
        }
        repo.start_maintenance(2).unwrap();

        let history = repo.maintenance_for_vehicle("AB-1234", 2).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].scheduled_date, date(2024, 7, 20));
        assert_eq!(history[1].scheduled_date, date(2024, 7, 11));

        let counts = repo.maintenance_counts().unwrap();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.scheduled, 2);
        assert_eq!(counts.in_progress, 1);

        let in_progress = repo
            .maintenance_records(&MaintenanceFilter {
                state: Some(MaintenanceState::InProgress),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id, 2);
    }

    #[test]
    fn test_retire_keeps_vehicle_and_history() {
        let repo = seeded();
        repo.schedule_maintenance(request("AB-1234")).unwrap();
        repo.schedule_maintenance(request("CD-5678")).unwrap();

        let retired = repo
            .set_vehicle_status("AB-1234", OperationalStatus::OutOfService)
            .unwrap();
        assert_eq!(retired.status, OperationalStatus::OutOfService);
        assert_eq!(repo.vehicle_count().unwrap(), 2);
        assert_eq!(repo.maintenance_for_vehicle("AB-1234", 10).unwrap().len(), 1);

        assert!(repo.delete_maintenance(2).is_ok());
        assert_eq!(repo.maintenance_count().unwrap(), 1);
        assert!(matches!(
            repo.delete_maintenance(2),
            Err(StorageError::NotFound { .. })
        ));
    }

    #[test]
    fn test_snapshot_restores_ids() {
        let repo = seeded();
        repo.schedule_maintenance(request("AB-1234")).unwrap();
        repo.schedule_maintenance(request("CD-5678")).unwrap();
        repo.delete_maintenance(1).unwrap();

        let restored = FleetRepository::from_snapshot(repo.snapshot().unwrap()).unwrap();
        assert_eq!(restored.vehicle_count().unwrap(), 2);
        assert_eq!(restored.get_maintenance(2).unwrap().vehicle, "CD-5678");

        let next = restored.schedule_maintenance(request("AB-1234")).unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn test_snapshot_plates_are_normalized() {
        let mut snapshot = seeded().snapshot().unwrap();
        snapshot.vehicles.push(Vehicle::new("ef-9012", 1, 52_000));
        snapshot.maintenance.push(MaintenanceRecord {
            id: 9,
            vehicle: "ef-9012".to_string(),
            maintenance_type_id: 1,
            provider_id: 1,
            kind: MaintenanceKind::Corrective,
            state: MaintenanceState::InProgress,
            priority: Priority::High,
            scheduled_date: date(2024, 8, 5),
            completed_date: None,
            scheduled_mileage: 52_000,
            estimated_cost: 90_000,
            actual_cost: None,
            description: String::new(),
        });

        let restored = FleetRepository::from_snapshot(snapshot).unwrap();
        assert_eq!(restored.get_maintenance(9).unwrap().vehicle, "EF-9012");
        assert_eq!(restored.maintenance_for_vehicle("EF-9012", 5).unwrap().len(), 1);
    }

    #[test]
    fn test_snapshot_with_max_id_is_rejected() {
        let mut snapshot = seeded().snapshot().unwrap();
        snapshot.maintenance.push(MaintenanceRecord {
            id: RecordId::MAX,
            vehicle: "AB-1234".to_string(),
            maintenance_type_id: 1,
            provider_id: 1,
            kind: MaintenanceKind::Preventive,
            state: MaintenanceState::Scheduled,
            priority: Priority::Low,
            scheduled_date: date(2024, 9, 1),
            completed_date: None,
            scheduled_mileage: 145_000,
            estimated_cost: 0,
            actual_cost: None,
            description: String::new(),
        });

        assert!(matches!(
            FleetRepository::from_snapshot(snapshot),
            Err(StorageError::IdExhausted)
        ));
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let repo = seeded();
        std::thread::scope(|scope| {
            let handle = scope.spawn(|| {
                let _guard = repo.tables.lock().unwrap();
                panic!("writer died holding the lock");
            });
            assert!(handle.join().is_err());
        });

        assert!(matches!(
            repo.vehicle_count(),
            Err(StorageError::LockPoisoned(_))
        ));
        assert!(matches!(
            repo.maintenance_count(),
            Err(StorageError::LockPoisoned(_))
        ));
    }
}
