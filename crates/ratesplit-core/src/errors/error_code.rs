//! RatesplitErrorCode trait for structured error reporting.

/// Trait for mapping ratesplit errors onto stable error code strings.
/// Every error enum implements this so callers (and event handlers) can
/// branch on a code instead of matching message text.
pub trait RatesplitErrorCode {
    /// Returns the error code string (e.g., "MALFORMED_REPORT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
pub const MALFORMED_REPORT: &str = "MALFORMED_REPORT";
pub const ROW_COUNT_EXCEEDED: &str = "ROW_COUNT_EXCEEDED";
pub const NUMERIC_DOMAIN_ERROR: &str = "NUMERIC_DOMAIN_ERROR";
pub const INVALID_CLUSTER_REQUEST: &str = "INVALID_CLUSTER_REQUEST";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
