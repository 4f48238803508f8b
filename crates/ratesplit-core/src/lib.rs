//! # ratesplit-core
//!
//! Foundation crate for the ratesplit site partitioner.
//! Defines shared types, errors, config, events, tracing, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

pub use config::{ClusterConfig, FeatureSet, RatesplitConfig, ReportConfig, ReportFormat};
pub use errors::{
    ClusterError, ConfigError, PipelineError, RatesplitErrorCode, ReportError, TransformError,
};
pub use events::{EventDispatcher, RatesplitEventHandler};
pub use types::{FeatureMatrix, SiteLikelihoodVector};
