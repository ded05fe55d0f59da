//! MixplanErrorCode trait for caller-facing error codes.

/// Trait for mapping Mixplan errors to stable error codes.
/// Every error enum implements this so a form or API layer can branch on
/// the code instead of the message text.
pub trait MixplanErrorCode {
    /// Returns the error code string (e.g., "ZERO_WEIGHT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const ALLOCATION_ERROR: &str = "ALLOCATION_ERROR";
pub const ZERO_WEIGHT: &str = "ZERO_WEIGHT";
pub const ZERO_EFFICIENCY_WEIGHT: &str = "ZERO_EFFICIENCY_WEIGHT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
