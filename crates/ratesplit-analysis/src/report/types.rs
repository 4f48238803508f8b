//! Parsed report types.

use ratesplit_core::config::FeatureSet;
use ratesplit_core::types::SiteLikelihoodVector;

/// Preamble layout of a PhyML report, decided from its second line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    /// No rate-category note: one preamble line after line 2.
    SimpleReport,
    /// Rate-category note present: four preamble lines after line 2.
    RateCategoryReport,
}

impl ReportLayout {
    /// Lines to skip between the discriminating second line and the header.
    pub fn extra_preamble_lines(&self) -> usize {
        match self {
            Self::SimpleReport => 1,
            Self::RateCategoryReport => 4,
        }
    }
}

/// Uniform result of parsing either report format.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReport {
    pub layout: ReportLayout,
    /// Overall site likelihood, one single-element vector per site.
    pub site_likelihoods: Vec<SiteLikelihoodVector>,
    /// Per-rate-category likelihoods, parallel to `site_likelihoods`.
    /// `None` when the report has no rate-category columns.
    pub rate_categories: Option<Vec<SiteLikelihoodVector>>,
}

impl ParsedReport {
    #[inline]
    pub fn site_count(&self) -> usize {
        self.site_likelihoods.len()
    }

    /// Number of rate categories per site, 0 when absent.
    pub fn rate_category_count(&self) -> usize {
        self.rate_categories
            .as_ref()
            .and_then(|rows| rows.first())
            .map(|v| v.len())
            .unwrap_or(0)
    }

    /// The concrete column set `feature_set` selects from this report;
    /// `Auto` resolves by whether rate categories are present.
    pub fn resolve_feature_set(&self, feature_set: FeatureSet) -> FeatureSet {
        match feature_set {
            FeatureSet::Auto if self.rate_categories.is_some() => FeatureSet::RateCategories,
            FeatureSet::Auto => FeatureSet::SiteLikelihood,
            other => other,
        }
    }

    /// The vectors to cluster for a feature set, or `None` when the report
    /// cannot supply it.
    pub fn features(&self, feature_set: FeatureSet) -> Option<&[SiteLikelihoodVector]> {
        match feature_set {
            FeatureSet::Auto => Some(
                self.rate_categories
                    .as_deref()
                    .unwrap_or(self.site_likelihoods.as_slice()),
            ),
            FeatureSet::SiteLikelihood => Some(self.site_likelihoods.as_slice()),
            FeatureSet::RateCategories => self.rate_categories.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(with_rates: bool) -> ParsedReport {
        ParsedReport {
            layout: ReportLayout::RateCategoryReport,
            site_likelihoods: vec![SiteLikelihoodVector::single(0.5)],
            rate_categories: with_rates.then(|| vec![SiteLikelihoodVector::new([0.1, 0.2])]),
        }
    }

    #[test]
    fn auto_prefers_rate_categories() {
        let r = report(true);
        assert_eq!(r.features(FeatureSet::Auto).unwrap()[0].len(), 2);
        assert_eq!(r.rate_category_count(), 2);
        assert_eq!(r.resolve_feature_set(FeatureSet::Auto), FeatureSet::RateCategories);
    }

    #[test]
    fn auto_falls_back_to_site_likelihood() {
        let r = report(false);
        assert_eq!(r.features(FeatureSet::Auto).unwrap()[0].len(), 1);
        assert!(r.features(FeatureSet::RateCategories).is_none());
        assert_eq!(r.rate_category_count(), 0);
        assert_eq!(r.resolve_feature_set(FeatureSet::Auto), FeatureSet::SiteLikelihood);
    }
}
