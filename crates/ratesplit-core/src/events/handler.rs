//! RatesplitEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing a partitioning run.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. `Send + Sync` so one handler can
/// be shared with the restart worker threads' owner.
pub trait RatesplitEventHandler: Send + Sync {
    fn on_report_parsed(&self, _event: &ReportParsedEvent) {}
    fn on_features_standardized(&self, _event: &FeaturesStandardizedEvent) {}
    fn on_clustering_complete(&self, _event: &ClusteringCompleteEvent) {}
    fn on_partition_built(&self, _event: &PartitionBuiltEvent) {}
    fn on_error(&self, _event: &ErrorEvent) {}
}
