//! Fleet Record Validation
//!
//! Checks applied where records are created or edited: plate format, year of
//! manufacture, odometer range and monotonicity, and maintenance completion.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, Validator};
