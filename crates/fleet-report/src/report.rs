//! Report assembly

use alerting::{count_vehicles_needing_attention, derive_fleet_alerts, Alert, AlertSummary};
use maintenance_scheduler::{MaintenanceForecast, MaintenanceScheduler, Urgency};
use serde::Serialize;
use storage::{FleetRepository, MaintenanceCounts, VehicleFilter};
use tracing::info;

use crate::dashboard::FleetOverview;

/// Next-service outlook of one vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleForecast {
    pub plate: String,
    #[serde(flatten)]
    pub forecast: MaintenanceForecast,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub overview: FleetOverview,
    pub maintenance: MaintenanceCounts,
    /// Operational vehicles within the widest urgency band
    pub attention_count: usize,
    /// Counts over the (possibly filtered) alert list
    pub summary: AlertSummary,
    pub alerts: Vec<Alert>,
    /// Every vehicle, by plate
    pub forecasts: Vec<VehicleForecast>,
}

/// Compute the report for the repository's current contents
pub fn build_report(
    repo: &FleetRepository,
    scheduler: &MaintenanceScheduler,
    level: Option<Urgency>,
) -> anyhow::Result<Report> {
    let vehicles = repo.vehicles(&VehicleFilter::default())?;
    let active = repo.active_maintenance()?;

    let alerts = derive_fleet_alerts(scheduler, &vehicles, &active, level)?;
    let summary = AlertSummary::from_alerts(&alerts);
    let attention_count = count_vehicles_needing_attention(scheduler, &vehicles)?;

    let forecasts = vehicles
        .iter()
        .map(|vehicle| {
            Ok(VehicleForecast {
                plate: vehicle.plate.clone(),
                forecast: scheduler.forecast(vehicle.current_mileage)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let overview = FleetOverview::build(&repo.centers()?, &vehicles);
    info!(
        "Report: {} vehicles, {:.1}% available, {} alerts ({} critical)",
        overview.counts.total, overview.counts.availability, summary.total, summary.critical
    );

    Ok(Report {
        overview,
        maintenance: repo.maintenance_counts()?,
        attention_count,
        summary,
        alerts,
        forecasts,
    })
}
