//! Planner errors.

use super::error_code::{self, MixplanErrorCode};
use super::{AllocationError, ConfigError};

/// Errors that can occur while building a media plan.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid plan request field {field}: {message}")]
    InvalidRequest { field: String, message: String },
}

impl MixplanErrorCode for PlanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Allocation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::InvalidRequest { .. } => error_code::INVALID_REQUEST,
        }
    }
}
