//! Interval Policy and Urgency Bands

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SchedulerError;

/// Distance between two mandatory preventive services (km)
pub const DEFAULT_INTERVAL_KM: i64 = 10_000;

/// Remaining distance at or below which a service counts as due soon (km)
pub const DEFAULT_DUE_SOON_KM: i64 = 500;

/// Urgency of the next preventive service.
///
/// Variants are declared from least to most urgent so the derived ordering
/// can be used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// No alert is emitted
    None,
    Medium,
    High,
    Critical,
}

impl Urgency {
    /// Lowercase label used in logs and reports
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::None => "none",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }

    /// Whether this level produces an alert
    pub fn is_alert(self) -> bool {
        self != Urgency::None
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bounds (inclusive, km remaining) of each urgency band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyThresholds {
    /// At or below this: critical (default: 500)
    pub critical_km: i64,
    /// At or below this: high (default: 1000)
    pub high_km: i64,
    /// At or below this: medium (default: 2000)
    pub medium_km: i64,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            critical_km: 500,
            high_km: 1_000,
            medium_km: 2_000,
        }
    }
}

impl UrgencyThresholds {
    /// Classify a remaining distance. Bands are checked from most to least
    /// urgent and the first match wins.
    pub fn classify(&self, remaining_km: i64) -> Urgency {
        if remaining_km <= self.critical_km {
            Urgency::Critical
        } else if remaining_km <= self.high_km {
            Urgency::High
        } else if remaining_km <= self.medium_km {
            Urgency::Medium
        } else {
            Urgency::None
        }
    }

    pub fn validate(&self) -> Result<(), SchedulerError> {
        let ordered = 0 <= self.critical_km
            && self.critical_km <= self.high_km
            && self.high_km <= self.medium_km;
        if ordered {
            Ok(())
        } else {
            Err(SchedulerError::InvalidThresholds {
                critical: self.critical_km,
                high: self.high_km,
                medium: self.medium_km,
            })
        }
    }
}

/// Maintenance policy injected into the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenancePolicy {
    /// Distance between services (default: 10,000 km)
    pub interval_km: i64,
    /// Due-soon window (default: 500 km)
    pub due_soon_km: i64,
    /// Urgency bands
    pub thresholds: UrgencyThresholds,
}

impl Default for MaintenancePolicy {
    fn default() -> Self {
        Self {
            interval_km: DEFAULT_INTERVAL_KM,
            due_soon_km: DEFAULT_DUE_SOON_KM,
            thresholds: UrgencyThresholds::default(),
        }
    }
}

impl MaintenancePolicy {
    /// Policy with a custom interval and default bands
    pub fn with_interval(interval_km: i64) -> Self {
        Self {
            interval_km,
            ..Default::default()
        }
    }

    /// Reject a non-positive interval or unordered bands
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.interval_km <= 0 {
            return Err(SchedulerError::NonPositiveInterval(self.interval_km));
        }
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        let bands = UrgencyThresholds::default();
        assert_eq!(bands.classify(1), Urgency::Critical);
        assert_eq!(bands.classify(500), Urgency::Critical);
        assert_eq!(bands.classify(501), Urgency::High);
        assert_eq!(bands.classify(1_000), Urgency::High);
        assert_eq!(bands.classify(1_001), Urgency::Medium);
        assert_eq!(bands.classify(2_000), Urgency::Medium);
        assert_eq!(bands.classify(2_001), Urgency::None);
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(Urgency::Critical > Urgency::High);
        assert!(Urgency::High > Urgency::Medium);
        assert!(Urgency::Medium > Urgency::None);
        assert!(!Urgency::None.is_alert());
    }

    #[test]
    fn test_policy_validation() {
        assert!(MaintenancePolicy::default().validate().is_ok());
        assert_eq!(
            MaintenancePolicy::with_interval(0).validate(),
            Err(SchedulerError::NonPositiveInterval(0))
        );
        assert!(MaintenancePolicy::with_interval(-5).validate().is_err());

        let unordered = MaintenancePolicy {
            thresholds: UrgencyThresholds {
                critical_km: 1_500,
                high_km: 1_000,
                medium_km: 2_000,
            },
            ..Default::default()
        };
        assert!(matches!(
            unordered.validate(),
            Err(SchedulerError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn test_partial_policy_deserializes_with_defaults() {
        let policy: MaintenancePolicy = serde_json::from_str(r#"{"interval_km": 15000}"#).unwrap();
        assert_eq!(policy.interval_km, 15_000);
        assert_eq!(policy.due_soon_km, DEFAULT_DUE_SOON_KM);
        assert_eq!(policy.thresholds, UrgencyThresholds::default());
    }
}
