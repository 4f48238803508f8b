//! Error handling for ratesplit.
//! One error enum per subsystem, `thiserror` only.

pub mod cluster_error;
pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod report_error;
pub mod transform_error;

pub use cluster_error::ClusterError;
pub use config_error::ConfigError;
pub use error_code::RatesplitErrorCode;
pub use pipeline_error::PipelineError;
pub use report_error::ReportError;
pub use transform_error::TransformError;
