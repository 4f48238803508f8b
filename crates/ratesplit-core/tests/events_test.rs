//! Tests for the ratesplit event system.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ratesplit_core::config::{FeatureSet, ReportFormat};
use ratesplit_core::events::types::*;
use ratesplit_core::events::{EventDispatcher, RatesplitEventHandler};

struct CountingHandler {
    parsed: AtomicUsize,
    clustered: AtomicUsize,
    errors: AtomicUsize,
}

impl CountingHandler {
    fn new() -> Self {
        Self {
            parsed: AtomicUsize::new(0),
            clustered: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        }
    }
}

impl RatesplitEventHandler for CountingHandler {
    fn on_report_parsed(&self, _event: &ReportParsedEvent) {
        self.parsed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_clustering_complete(&self, _event: &ClusteringCompleteEvent) {
        self.clustered.fetch_add(1, Ordering::Relaxed);
    }

    fn on_error(&self, _event: &ErrorEvent) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

struct PanickingHandler;

impl RatesplitEventHandler for PanickingHandler {
    fn on_report_parsed(&self, _event: &ReportParsedEvent) {
        panic!("handler failure");
    }
}

fn parsed_event() -> ReportParsedEvent {
    ReportParsedEvent {
        path: PathBuf::from("/tmp/site_lk.txt"),
        format: ReportFormat::Phyml,
        sites: 10,
        rate_categories: 4,
    }
}

#[test]
fn test_handler_noop_defaults() {
    struct NoopHandler;
    impl RatesplitEventHandler for NoopHandler {}

    let handler = NoopHandler;
    handler.on_report_parsed(&parsed_event());
    handler.on_features_standardized(&FeaturesStandardizedEvent {
        feature_set: Some(FeatureSet::RateCategories),
        rows: 10,
        columns: 4,
    });
    handler.on_partition_built(&PartitionBuiltEvent {
        clusters: 2,
        sites: 10,
        singleton_clusters: 0,
        empty_clusters: 0,
    });
}

#[test]
fn test_dispatch_reaches_every_handler() {
    let a = Arc::new(CountingHandler::new());
    let b = Arc::new(CountingHandler::new());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(a.clone());
    dispatcher.register(b.clone());
    assert_eq!(dispatcher.handler_count(), 2);

    dispatcher.emit_report_parsed(&parsed_event());
    dispatcher.emit_clustering_complete(&ClusteringCompleteEvent {
        k: 2,
        restarts: 100,
        seed: 1,
        inertia: 3.5,
        iterations: 4,
        converged: true,
        duration_ms: 12,
    });
    dispatcher.emit_error(&ErrorEvent {
        message: "boom".into(),
        error_code: "TEST".into(),
    });

    for h in [&a, &b] {
        assert_eq!(h.parsed.load(Ordering::Relaxed), 1);
        assert_eq!(h.clustered.load(Ordering::Relaxed), 1);
        assert_eq!(h.errors.load(Ordering::Relaxed), 1);
    }
}

#[test]
fn test_panicking_handler_isolated() {
    let counter = Arc::new(CountingHandler::new());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_report_parsed(&parsed_event());
    assert_eq!(counter.parsed.load(Ordering::Relaxed), 1);
}

#[test]
fn test_empty_dispatcher_is_noop() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_report_parsed(&parsed_event());
}
