//! Error handling for Mixplan.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod allocation_error;
pub mod config_error;
pub mod error_code;
pub mod plan_error;

pub use allocation_error::{AllocationError, AllocationWarning};
pub use config_error::ConfigError;
pub use error_code::MixplanErrorCode;
pub use plan_error::PlanError;
