//! Report parsing errors.

use super::error_code::{self, RatesplitErrorCode};

/// Errors that can occur while reading a per-site likelihood report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Could not open likelihood report {path}: {message}")]
    NotFound { path: String, message: String },

    #[error("Malformed report {path} at line {line}: {message}")]
    Malformed {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Malformed report {path} at line {line}: field '{field}' has unusable value '{value}'")]
    /// Not a number, or a number with no positive finite likelihood.
    InvalidNumber {
        path: String,
        line: usize,
        field: String,
        value: String,
    },

    #[error("Report {path} has {rows} site rows, more than the {limit} a PhyML report can align")]
    RowCountExceeded {
        path: String,
        rows: usize,
        limit: usize,
    },
}

impl ReportError {
    pub(crate) fn path(&self) -> &str {
        match self {
            Self::NotFound { path, .. }
            | Self::Malformed { path, .. }
            | Self::InvalidNumber { path, .. }
            | Self::RowCountExceeded { path, .. } => path,
        }
    }
}

impl RatesplitErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::RESOURCE_NOT_FOUND,
            Self::Malformed { .. } | Self::InvalidNumber { .. } => error_code::MALFORMED_REPORT,
            Self::RowCountExceeded { .. } => error_code::ROW_COUNT_EXCEEDED,
        }
    }
}
