//! Event payload types.

use std::path::PathBuf;

use crate::config::{FeatureSet, ReportFormat};

/// Payload for `on_report_parsed`.
#[derive(Debug, Clone)]
pub struct ReportParsedEvent {
    pub path: PathBuf,
    pub format: ReportFormat,
    pub sites: usize,
    /// Number of rate-category columns; 0 for reports without them.
    pub rate_categories: usize,
}

/// Payload for `on_features_standardized`.
#[derive(Debug, Clone)]
pub struct FeaturesStandardizedEvent {
    /// Report columns the features came from, never `Auto`. `None` when the
    /// caller supplied the likelihood vectors directly.
    pub feature_set: Option<FeatureSet>,
    pub rows: usize,
    pub columns: usize,
}

/// Payload for `on_clustering_complete`. The timing fields are advisory.
#[derive(Debug, Clone)]
pub struct ClusteringCompleteEvent {
    pub k: usize,
    pub restarts: usize,
    pub seed: u64,
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
    pub duration_ms: u64,
}

/// Payload for `on_partition_built`.
#[derive(Debug, Clone)]
pub struct PartitionBuiltEvent {
    pub clusters: usize,
    pub sites: usize,
    pub singleton_clusters: usize,
    pub empty_clusters: usize,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
