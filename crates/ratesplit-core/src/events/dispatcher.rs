//! EventDispatcher: synchronous fan-out to registered handlers.

use std::sync::Arc;

use super::handler::RatesplitEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// Owned by one partitioning run; nothing here is process-global.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn RatesplitEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn RatesplitEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and skipped; later handlers still run.
    fn emit<F: Fn(&dyn RatesplitEventHandler)>(&self, event: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!(event, "event handler panicked");
            }
        }
    }

    pub fn emit_report_parsed(&self, event: &ReportParsedEvent) {
        self.emit("report_parsed", |h| h.on_report_parsed(event));
    }

    pub fn emit_features_standardized(&self, event: &FeaturesStandardizedEvent) {
        self.emit("features_standardized", |h| h.on_features_standardized(event));
    }

    pub fn emit_clustering_complete(&self, event: &ClusteringCompleteEvent) {
        self.emit("clustering_complete", |h| h.on_clustering_complete(event));
    }

    pub fn emit_partition_built(&self, event: &PartitionBuiltEvent) {
        self.emit("partition_built", |h| h.on_partition_built(event));
    }

    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit("error", |h| h.on_error(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
