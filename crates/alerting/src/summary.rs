//! Alert Counts by Level

use maintenance_scheduler::Urgency;
use serde::{Deserialize, Serialize};

use crate::Alert;

/// Alert totals shown on the alert center
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
}

impl AlertSummary {
    /// Count alerts per level
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        alerts.iter().fold(Self::default(), |mut summary, alert| {
            summary.total += 1;
            match alert.level {
                Urgency::Critical => summary.critical += 1,
                Urgency::High => summary.high += 1,
                Urgency::Medium => summary.medium += 1,
                Urgency::None => {}
            }
            summary
        })
    }

    /// Number of alerts at a given level
    pub fn count(&self, level: Urgency) -> usize {
        match level {
            Urgency::Critical => self.critical,
            Urgency::High => self.high,
            Urgency::Medium => self.medium,
            Urgency::None => 0,
        }
    }
}
