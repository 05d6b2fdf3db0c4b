//! Scheduler Error Types

use thiserror::Error;

/// Invalid scheduling input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// Interval must be strictly positive
    #[error("Maintenance interval must be positive, got {0} km")]
    NonPositiveInterval(i64),

    /// Odometer readings cannot be negative
    #[error("Mileage must not be negative, got {0} km")]
    NegativeMileage(i64),

    /// Next threshold does not fit in the mileage type
    #[error("Next maintenance threshold overflows for mileage {mileage} km with interval {interval} km")]
    ThresholdOverflow { mileage: i64, interval: i64 },

    /// Urgency bands must be non-negative and ascending
    #[error("Urgency thresholds must satisfy 0 <= critical ({critical}) <= high ({high}) <= medium ({medium})")]
    InvalidThresholds { critical: i64, high: i64, medium: i64 },
}
