//! Numeric-domain errors raised by the likelihood transform.

use super::error_code::{self, RatesplitErrorCode};

/// Errors that can occur while log-transforming and standardizing likelihoods.
///
/// Sites are 1-based, columns are 0-based feature indices.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("No site likelihoods to transform")]
    Empty,

    #[error("Site {site} has {found} likelihood values, expected {expected}")]
    RaggedRows {
        site: usize,
        expected: usize,
        found: usize,
    },

    #[error("Site {site} column {column}: likelihood {value} is outside the log domain")]
    NonPositiveLikelihood {
        site: usize,
        column: usize,
        value: f64,
    },

    #[error("Column {column} has zero variance across sites and cannot be standardized")]
    ZeroVariance { column: usize },
}

impl RatesplitErrorCode for TransformError {
    fn error_code(&self) -> &'static str {
        error_code::NUMERIC_DOMAIN_ERROR
    }
}
