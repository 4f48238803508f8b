//! # ratesplit-analysis
//!
//! Rate-heterogeneity site partitioning: per-site likelihood report parsing
//! (PhyML, RAxML) → natural-log + z-score features → multi-restart k-means →
//! cluster-to-sites partition.

pub mod cluster;
pub mod partition;
pub mod pipeline;
pub mod report;
pub mod transform;

pub use cluster::{ClusterAssignment, ClusterOutcome, KMeans};
pub use partition::{build_partition, Partition};
pub use pipeline::{PartitionRun, SitePartitioner};
pub use report::{parser_for, ParsedReport, ReportLayout, ReportParser};
