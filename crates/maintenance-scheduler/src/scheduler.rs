//! Maintenance Scheduler Implementation

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{MaintenancePolicy, SchedulerError, Urgency, UrgencyThresholds};

fn check_inputs(current_mileage: i64, interval: i64) -> Result<(), SchedulerError> {
    if interval <= 0 {
        return Err(SchedulerError::NonPositiveInterval(interval));
    }
    if current_mileage < 0 {
        return Err(SchedulerError::NegativeMileage(current_mileage));
    }
    Ok(())
}

/// Smallest multiple of `interval` strictly greater than `current_mileage`.
///
/// A reading exactly on a multiple returns the following multiple: the
/// vehicle counts as freshly serviced at the boundary.
pub fn next_maintenance_threshold(current_mileage: i64, interval: i64) -> Result<i64, SchedulerError> {
    check_inputs(current_mileage, interval)?;
    (current_mileage / interval + 1)
        .checked_mul(interval)
        .ok_or(SchedulerError::ThresholdOverflow {
            mileage: current_mileage,
            interval,
        })
}

/// Kilometres left until the next threshold, always in `[1, interval]`
pub fn remaining_distance(current_mileage: i64, interval: i64) -> Result<i64, SchedulerError> {
    Ok(next_maintenance_threshold(current_mileage, interval)? - current_mileage)
}

/// True when the remaining distance is at most `soon_threshold`
pub fn is_maintenance_due_soon(
    current_mileage: i64,
    interval: i64,
    soon_threshold: i64,
) -> Result<bool, SchedulerError> {
    Ok(remaining_distance(current_mileage, interval)? <= soon_threshold)
}

/// Classify a remaining distance with the default 500/1000/2000 km bands
pub fn classify_urgency(remaining_km: i64) -> Urgency {
    UrgencyThresholds::default().classify(remaining_km)
}

/// Share of operational vehicles as a percentage rounded to one decimal,
/// ties to even. An empty fleet reports 0.
pub fn operational_availability(total_vehicles: usize, operational_vehicles: usize) -> f64 {
    if total_vehicles == 0 {
        return 0.0;
    }
    let ratio = operational_vehicles as f64 / total_vehicles as f64 * 100.0;
    (ratio * 10.0).round_ties_even() / 10.0
}

/// Scheduling outlook for one odometer reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceForecast {
    /// Odometer reading the forecast was computed for
    pub current_mileage: i64,
    /// Mileage at which the next service is due
    pub threshold_km: i64,
    /// Distance left until then
    pub remaining_km: i64,
    pub urgency: Urgency,
    /// Within the policy's due-soon window
    pub due_soon: bool,
}

/// Scheduler bound to one validated maintenance policy
#[derive(Debug, Clone, Default)]
pub struct MaintenanceScheduler {
    policy: MaintenancePolicy,
}

impl MaintenanceScheduler {
    /// Create a scheduler, rejecting an invalid policy
    pub fn new(policy: MaintenancePolicy) -> Result<Self, SchedulerError> {
        policy.validate()?;
        info!(
            "Maintenance scheduler created: interval {} km, due-soon window {} km",
            policy.interval_km, policy.due_soon_km
        );
        Ok(Self { policy })
    }

    /// Policy in effect
    pub fn policy(&self) -> &MaintenancePolicy {
        &self.policy
    }

    /// Next service threshold for a reading
    pub fn next_threshold(&self, current_mileage: i64) -> Result<i64, SchedulerError> {
        next_maintenance_threshold(current_mileage, self.policy.interval_km)
    }

    /// Distance left until the next service
    pub fn remaining(&self, current_mileage: i64) -> Result<i64, SchedulerError> {
        remaining_distance(current_mileage, self.policy.interval_km)
    }

    /// Whether the next service falls within the due-soon window
    pub fn is_due_soon(&self, current_mileage: i64) -> Result<bool, SchedulerError> {
        is_maintenance_due_soon(current_mileage, self.policy.interval_km, self.policy.due_soon_km)
    }

    /// Urgency band for a remaining distance under this policy
    pub fn classify(&self, remaining_km: i64) -> Urgency {
        self.policy.thresholds.classify(remaining_km)
    }

    /// Full outlook for one reading
    pub fn forecast(&self, current_mileage: i64) -> Result<MaintenanceForecast, SchedulerError> {
        let threshold_km = self.next_threshold(current_mileage)?;
        let remaining_km = threshold_km - current_mileage;
        let urgency = self.classify(remaining_km);
        debug!(
            "Forecast for {} km: next service at {} km ({} km left, {})",
            current_mileage, threshold_km, remaining_km, urgency
        );

        Ok(MaintenanceForecast {
            current_mileage,
            threshold_km,
            remaining_km,
            urgency,
            due_soon: remaining_km <= self.policy.due_soon_km,
        })
    }
}
