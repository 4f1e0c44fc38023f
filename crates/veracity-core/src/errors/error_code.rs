//! VeracityErrorCode trait for embedding layers.

/// Structured error codes for callers that cross a language boundary.
/// Every error enum implements this to provide a stable code string.
pub trait VeracityErrorCode {
    /// Returns the error code string (e.g., "SHAPE_MISMATCH").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SHAPE_MISMATCH: &str = "SHAPE_MISMATCH";
pub const INVALID_LABEL: &str = "INVALID_LABEL";
pub const INVALID_PRIOR: &str = "INVALID_PRIOR";
pub const INVALID_EPSILON: &str = "INVALID_EPSILON";
pub const NON_FINITE_PARAMETER: &str = "NON_FINITE_PARAMETER";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
