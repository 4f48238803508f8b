//! Shared value types passed between pipeline stages.

pub mod collections;
pub mod likelihood;
pub mod matrix;

pub use likelihood::SiteLikelihoodVector;
pub use matrix::FeatureMatrix;
