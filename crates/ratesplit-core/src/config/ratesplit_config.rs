//! Top-level ratesplit configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ClusterConfig, FeatureSet, ReportConfig, ReportFormat};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Caller overrides (applied via `apply_overrides`)
/// 2. TOML config file, when one is given
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RatesplitConfig {
    pub cluster: ClusterConfig,
    pub report: ReportConfig,
}

/// Explicit override values supplied by the embedding program.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub restarts: Option<usize>,
    pub max_iterations: Option<usize>,
    pub tolerance: Option<f64>,
    pub parallelism: Option<usize>,
    pub seed: Option<u64>,
    pub format: Option<ReportFormat>,
    pub feature_set: Option<FeatureSet>,
}

impl RatesplitConfig {
    /// Load configuration with layered resolution.
    ///
    /// A `config_path` that does not exist is an error: unlike a discovered
    /// project file, an explicitly named config is required.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse a TOML file. Unknown keys are ignored.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply caller overrides on top of the current values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(restarts) = overrides.restarts {
            self.cluster.restarts = Some(restarts);
        }
        if let Some(max_iterations) = overrides.max_iterations {
            self.cluster.max_iterations = Some(max_iterations);
        }
        if let Some(tolerance) = overrides.tolerance {
            self.cluster.tolerance = Some(tolerance);
        }
        if let Some(parallelism) = overrides.parallelism {
            self.cluster.parallelism = Some(parallelism);
        }
        if let Some(seed) = overrides.seed {
            self.cluster.seed = Some(seed);
        }
        if let Some(format) = overrides.format {
            self.report.format = Some(format);
        }
        if let Some(feature_set) = overrides.feature_set {
            self.report.feature_set = Some(feature_set);
        }
    }

    /// Validate the configuration values.
    pub fn validate(config: &RatesplitConfig) -> Result<(), ConfigError> {
        if config.cluster.restarts == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "cluster.restarts".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if config.cluster.max_iterations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "cluster.max_iterations".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if config.cluster.parallelism == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "cluster.parallelism".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(tolerance) = config.cluster.tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "cluster.tolerance".to_string(),
                    message: "must be a finite non-negative number".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialize>".to_string(),
            message: e.to_string(),
        })
    }
}
