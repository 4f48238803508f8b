//! Configuration system for ratesplit.
//! TOML-based, 3-layer resolution: caller overrides > config file > defaults.

pub mod cluster_config;
pub mod ratesplit_config;
pub mod report_config;

pub use cluster_config::ClusterConfig;
pub use ratesplit_config::{ConfigOverrides, RatesplitConfig};
pub use report_config::{FeatureSet, ReportConfig, ReportFormat};
