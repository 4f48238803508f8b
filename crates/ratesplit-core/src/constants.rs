/// ratesplit version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largest site count a PhyML per-site report can carry. Beyond this the
/// site-index field runs into the likelihood field and columns misalign.
pub const MAX_REPORT_SITES: usize = 999_999;

/// Default number of independent k-means++ initializations.
pub const DEFAULT_RESTARTS: usize = 100;

/// Default Lloyd iteration cap per restart.
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// Default convergence tolerance, relative to the mean feature variance.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default number of restart worker threads.
pub const DEFAULT_PARALLELISM: usize = 1;
