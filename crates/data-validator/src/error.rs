//! Validation Error Types

use thiserror::Error;

/// Errors during record validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Plate does not follow the `XX-1234` format
    #[error("Invalid plate format '{0}', expected XX-1234")]
    InvalidPlate(String),

    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Odometer update below the stored reading
    #[error("New mileage ({new} km) cannot be lower than the current one ({previous} km)")]
    MileageDecreased { previous: i64, new: i64 },

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
