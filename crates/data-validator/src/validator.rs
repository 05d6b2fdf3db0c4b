//! Record Validator

use chrono::{Datelike, NaiveDate, Utc};
use fleet_model::MaintenanceState;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;

lazy_static! {
    /// Chilean plate: two letters, dash, four digits
    static ref REGEX_IS_CHILEAN_PLATE: Regex = Regex::new(r"^[A-Z]{2}-[0-9]{4}$").unwrap();
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Oldest accepted year of manufacture
    pub min_year: i32,
    /// Highest plausible odometer reading (km)
    pub max_mileage: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_year: 2000,
            max_mileage: 2_000_000,
        }
    }
}

/// Validator for vehicle and maintenance edits
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: i64,
        range: (i64, i64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Normalize a plate to uppercase and check its format
    pub fn validate_plate(&self, raw: &str) -> Result<String, ValidationError> {
        let plate = raw.trim().to_uppercase();
        if REGEX_IS_CHILEAN_PLATE.is_match(&plate) {
            Ok(plate)
        } else {
            Err(ValidationError::InvalidPlate(raw.to_string()))
        }
    }

    /// Year of manufacture, allowing next year's models
    pub fn validate_year(&self, year: i32, current_year: i32) -> Result<(), ValidationError> {
        self.validate_range(
            "year",
            i64::from(year),
            (i64::from(self.config.min_year), i64::from(current_year) + 1),
        )
    }

    /// Year of manufacture against today's date
    pub fn validate_year_now(&self, year: i32) -> Result<(), ValidationError> {
        self.validate_year(year, Utc::now().year())
    }

    /// Odometer reading within the plausible range
    pub fn validate_mileage(&self, mileage: i64) -> Result<(), ValidationError> {
        self.validate_range("mileage", mileage, (0, self.config.max_mileage))
    }

    /// Odometer update: in range and never below the stored reading
    pub fn validate_mileage_update(&self, previous: i64, new: i64) -> Result<(), ValidationError> {
        self.validate_mileage(new)?;
        if new < previous {
            debug!("Rejected odometer rollback from {} to {} km", previous, new);
            return Err(ValidationError::MileageDecreased { previous, new });
        }
        Ok(())
    }

    /// Cost fields are whole CLP amounts and cannot be negative
    pub fn validate_cost(&self, field: &'static str, cost: i64) -> Result<(), ValidationError> {
        self.validate_range(field, cost, (0, i64::MAX))
    }

    /// A completed job needs its realization date; the real cost is optional
    pub fn validate_completion(
        &self,
        state: MaintenanceState,
        completed_date: Option<NaiveDate>,
        actual_cost: Option<i64>,
    ) -> Result<(), ValidationError> {
        if state == MaintenanceState::Completed && completed_date.is_none() {
            return Err(ValidationError::MissingField("completed_date"));
        }
        if let Some(cost) = actual_cost {
            self.validate_cost("actual_cost", cost)?;
        }
        Ok(())
    }
}
