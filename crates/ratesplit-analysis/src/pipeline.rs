//! SitePartitioner: report → log-standardized features → k-means → partition.
//!
//! Strictly one-way: each stage consumes the previous stage's output and
//! nothing calls back. Every failure is terminal for the run; it is reported
//! to the event handlers and returned to the caller.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratesplit_core::config::{FeatureSet, RatesplitConfig};
use ratesplit_core::errors::{PipelineError, RatesplitErrorCode};
use ratesplit_core::events::types::{
    ClusteringCompleteEvent, ErrorEvent, FeaturesStandardizedEvent, PartitionBuiltEvent,
    ReportParsedEvent,
};
use ratesplit_core::events::{EventDispatcher, RatesplitEventHandler};
use ratesplit_core::tracing::metrics;
use ratesplit_core::types::SiteLikelihoodVector;
use tracing::{field, info, info_span};

use crate::cluster::{ClusterOutcome, KMeans};
use crate::partition::{build_partition, Partition};
use crate::report::{self, ParsedReport};
use crate::transform;

/// Everything a caller gets back from one run.
#[derive(Debug, Clone)]
pub struct PartitionRun {
    pub partition: Partition,
    /// Inertia of the winning restart, for the caller's model scoring.
    pub inertia: f64,
    /// Master seed actually used; feed it back to replay the run.
    pub seed: u64,
    pub iterations: usize,
    pub converged: bool,
    /// Advisory wall time of the clustering stage.
    pub clustering_time: Duration,
}

/// Runs the partitioning pipeline under one configuration.
///
/// Event handlers registered here observe only this partitioner's runs.
#[derive(Debug, Default)]
pub struct SitePartitioner {
    config: RatesplitConfig,
    dispatcher: EventDispatcher,
}

impl SitePartitioner {
    pub fn new(config: RatesplitConfig) -> Self {
        Self {
            config,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Register an observer for this partitioner's runs.
    pub fn with_handler(mut self, handler: Arc<dyn RatesplitEventHandler>) -> Self {
        self.dispatcher.register(handler);
        self
    }

    pub fn config(&self) -> &RatesplitConfig {
        &self.config
    }

    /// Parse a report in the configured format and partition its sites into
    /// `k` groups.
    ///
    /// `k` is validated before the report is opened.
    pub fn partition_report(&self, path: &Path, k: usize) -> Result<PartitionRun, PipelineError> {
        let span = info_span!("partition_report", path = %path.display(), k);
        let _guard = span.enter();
        self.report_failure(self.run_report(path, k))
    }

    /// Partition already-parsed per-site likelihood vectors into `k` groups.
    pub fn partition_likelihoods(
        &self,
        sites: &[SiteLikelihoodVector],
        k: usize,
    ) -> Result<PartitionRun, PipelineError> {
        let span = info_span!("partition_likelihoods", sites = sites.len(), k);
        let _guard = span.enter();
        self.report_failure(KMeans::new(k, &self.config.cluster).map_err(PipelineError::from).and_then(
            |kmeans| self.cluster_sites(sites, None, &kmeans),
        ))
    }

    fn run_report(&self, path: &Path, k: usize) -> Result<PartitionRun, PipelineError> {
        let kmeans = KMeans::new(k, &self.config.cluster)?;
        let report = self.parse(path)?;

        let feature_set = self.config.report.effective_feature_set();
        let sites = report
            .features(feature_set)
            .ok_or_else(|| PipelineError::FeatureSetUnavailable {
                path: path.display().to_string(),
                requested: feature_set.to_string(),
            })?;
        self.cluster_sites(sites, Some(report.resolve_feature_set(feature_set)), &kmeans)
    }

    fn parse(&self, path: &Path) -> Result<ParsedReport, PipelineError> {
        let format = self.config.report.effective_format();
        let span = info_span!("report_parse", %format, report_parse_time = field::Empty);
        let _guard = span.enter();
        let start = Instant::now();

        let report = report::parser_for(format).parse_file(path)?;

        span.record(metrics::REPORT_PARSE_TIME, start.elapsed().as_millis() as u64);
        info!(
            sites = report.site_count(),
            rate_categories = report.rate_category_count(),
            "report parsed"
        );
        self.dispatcher.emit_report_parsed(&ReportParsedEvent {
            path: path.to_path_buf(),
            format,
            sites: report.site_count(),
            rate_categories: report.rate_category_count(),
        });
        Ok(report)
    }

    fn cluster_sites(
        &self,
        sites: &[SiteLikelihoodVector],
        feature_set: Option<FeatureSet>,
        kmeans: &KMeans,
    ) -> Result<PartitionRun, PipelineError> {
        let matrix = transform::standardize_log_likelihoods(sites)?;
        self.dispatcher
            .emit_features_standardized(&FeaturesStandardizedEvent {
                feature_set,
                rows: matrix.rows(),
                columns: matrix.cols(),
            });

        let outcome = kmeans.fit(&matrix)?;
        self.dispatcher
            .emit_clustering_complete(&ClusteringCompleteEvent {
                k: kmeans.k(),
                restarts: outcome.restarts,
                seed: outcome.seed,
                inertia: outcome.inertia,
                iterations: outcome.iterations,
                converged: outcome.converged,
                duration_ms: outcome.elapsed.as_millis() as u64,
            });

        Ok(self.finish(outcome))
    }

    fn finish(&self, outcome: ClusterOutcome) -> PartitionRun {
        let ClusterOutcome {
            assignment,
            centroids,
            inertia,
            iterations,
            converged,
            seed,
            elapsed,
            ..
        } = outcome;
        let partition = build_partition(&assignment, centroids);

        let singletons = partition.singleton_clusters().len();
        let empty = partition.empty_clusters().len();
        if singletons > 0 || empty > 0 {
            info!(singletons, empty, "partition has degenerate clusters");
        }
        self.dispatcher.emit_partition_built(&PartitionBuiltEvent {
            clusters: partition.num_clusters(),
            sites: partition.site_count(),
            singleton_clusters: singletons,
            empty_clusters: empty,
        });

        PartitionRun {
            partition,
            inertia,
            seed,
            iterations,
            converged,
            clustering_time: elapsed,
        }
    }

    fn report_failure<T>(&self, result: Result<T, PipelineError>) -> Result<T, PipelineError> {
        if let Err(e) = &result {
            tracing::warn!(error = %e, code = e.error_code(), "partitioning failed");
            self.dispatcher.emit_error(&ErrorEvent {
                message: e.to_string(),
                error_code: e.error_code().to_string(),
            });
        }
        result
    }
}
