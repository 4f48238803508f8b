//! Clustering configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_PARALLELISM, DEFAULT_RESTARTS, DEFAULT_TOLERANCE,
};

/// Configuration for the k-means clusterer.
///
/// The number of clusters is deliberately absent: callers always pass it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ClusterConfig {
    /// Independent k-means++ initializations. Default: 100.
    pub restarts: Option<usize>,
    /// Lloyd iterations per restart. Default: 300.
    pub max_iterations: Option<usize>,
    /// Convergence tolerance on squared centroid shift, scaled by the mean
    /// feature variance. Default: 1e-4.
    pub tolerance: Option<f64>,
    /// Worker threads for the restart loop. Default: 1.
    pub parallelism: Option<usize>,
    /// Seed for centroid initialization. Unset draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl ClusterConfig {
    /// Returns the effective restart count, defaulting to 100.
    pub fn effective_restarts(&self) -> usize {
        self.restarts.unwrap_or(DEFAULT_RESTARTS)
    }

    /// Returns the effective iteration cap, defaulting to 300.
    pub fn effective_max_iterations(&self) -> usize {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    /// Returns the effective tolerance, defaulting to 1e-4.
    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    /// Returns the effective parallelism, defaulting to 1.
    pub fn effective_parallelism(&self) -> usize {
        self.parallelism.unwrap_or(DEFAULT_PARALLELISM)
    }

    /// Same config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
