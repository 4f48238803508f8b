//! Structured span field names for ratesplit timings.
//!
//! Spans declare these fields as `Empty` and record them on completion,
//! so log queries can rely on consistent names.

/// Report parser: wall time spent reading and parsing, in milliseconds.
pub const REPORT_PARSE_TIME: &str = "report_parse_time";

/// Clusterer: wall time spent across all restarts, in milliseconds.
pub const KMEANS_TIME: &str = "kmeans_time";

/// Clusterer: within-cluster sum of squares of the winning restart.
pub const KMEANS_INERTIA: &str = "kmeans_inertia";
