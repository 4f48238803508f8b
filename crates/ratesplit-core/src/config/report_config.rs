//! Report input configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which external program produced the per-site likelihood report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// PhyML `*_phyml_lk.txt`: header row plus one row per site.
    Phyml,
    /// RAxML `RAxML_perSiteLLs.*`: one line of base-10 log likelihoods.
    Raxml,
}

impl ReportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Phyml => "phyml",
            Self::Raxml => "raxml",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which likelihood columns become clustering features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSet {
    /// Rate-category likelihoods when the report has them, else the
    /// overall site likelihood.
    #[default]
    Auto,
    /// Only the overall site likelihood.
    SiteLikelihood,
    /// Only the per-rate-category likelihoods; fails on reports without them.
    RateCategories,
}

impl FeatureSet {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::SiteLikelihood => "site_likelihood",
            Self::RateCategories => "rate_categories",
        }
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for report ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Report layout to parse. Default: PhyML.
    pub format: Option<ReportFormat>,
    /// Feature selection. Default: auto.
    pub feature_set: Option<FeatureSet>,
}

impl ReportConfig {
    /// Returns the effective report format, defaulting to PhyML.
    pub fn effective_format(&self) -> ReportFormat {
        self.format.unwrap_or(ReportFormat::Phyml)
    }

    /// Returns the effective feature set, defaulting to auto.
    pub fn effective_feature_set(&self) -> FeatureSet {
        self.feature_set.unwrap_or_default()
    }
}
