//! Clustering request errors.

use super::error_code::{self, RatesplitErrorCode};

/// Errors that reject a clustering request before any computation begins.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("Number of clusters must be positive, got {k}")]
    InvalidK { k: usize },

    #[error("Cannot form {k} clusters from {sites} sites")]
    TooFewSites { k: usize, sites: usize },

    #[error("Restart count must be at least 1")]
    InvalidRestarts,

    #[error("Parallelism degree must be at least 1")]
    InvalidParallelism,

    #[error("Iteration cap must be at least 1")]
    InvalidMaxIterations,

    #[error("Convergence tolerance must be finite and non-negative, got {tolerance}")]
    InvalidTolerance { tolerance: f64 },

    #[error("Feature matrix has no rows or no columns")]
    EmptyMatrix,

    #[error("Failed to build restart thread pool: {message}")]
    ThreadPool { message: String },
}

impl RatesplitErrorCode for ClusterError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_CLUSTER_REQUEST
    }
}
