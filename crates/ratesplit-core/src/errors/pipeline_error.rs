//! Pipeline errors.

use super::error_code::{self, RatesplitErrorCode};
use super::{ClusterError, ConfigError, ReportError, TransformError};

/// Errors that can occur during a partitioning run.
/// Aggregates subsystem errors via `From` conversions; every one is terminal.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("Cluster error: {0}")]
    Cluster(#[from] ClusterError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report {path} has no {requested} columns")]
    FeatureSetUnavailable { path: String, requested: String },
}

impl PipelineError {
    /// Path of the report involved in the failure, when there is one.
    pub fn report_path(&self) -> Option<&str> {
        match self {
            Self::Report(e) => Some(e.path()),
            Self::FeatureSetUnavailable { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl RatesplitErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Report(e) => e.error_code(),
            Self::Transform(e) => e.error_code(),
            Self::Cluster(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::FeatureSetUnavailable { .. } => error_code::PIPELINE_ERROR,
        }
    }
}
