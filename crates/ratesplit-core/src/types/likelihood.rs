//! Per-site likelihood vectors.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Likelihoods for one alignment site, one value per rate category.
///
/// A single-element vector carries only the overall site likelihood.
/// Position in the parsed sequence is the site index (first = site 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteLikelihoodVector(SmallVec<[f64; 4]>);

impl SiteLikelihoodVector {
    /// Build a vector from per-category likelihoods.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self(values.into_iter().collect())
    }

    /// A vector holding only the overall site likelihood.
    pub fn single(value: f64) -> Self {
        let mut inner = SmallVec::new();
        inner.push(value);
        Self(inner)
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for SiteLikelihoodVector {
    fn from(values: Vec<f64>) -> Self {
        Self(SmallVec::from_vec(values))
    }
}

impl std::ops::Index<usize> for SiteLikelihoodVector {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_holds_one_value() {
        let v = SiteLikelihoodVector::single(2.5e-3);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0], 2.5e-3);
    }

    #[test]
    fn serializes_as_plain_list() {
        let v = SiteLikelihoodVector::new([0.5, 0.25]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[0.5,0.25]");
    }
}
