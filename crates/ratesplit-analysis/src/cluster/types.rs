//! Clustering result types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cluster label for every site, indexed by 0-based site position.
///
/// Labels lie in `[0, k)`. Not every label need be used: empty clusters are
/// a valid outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAssignment")]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    k: usize,
}

/// Unchecked wire form; deserialization goes through `ClusterAssignment::new`.
#[derive(Deserialize)]
struct RawAssignment {
    labels: Vec<usize>,
    k: usize,
}

impl TryFrom<RawAssignment> for ClusterAssignment {
    type Error = String;

    fn try_from(raw: RawAssignment) -> Result<Self, Self::Error> {
        let k = raw.k;
        Self::new(raw.labels, k).ok_or_else(|| format!("cluster label out of range for k = {k}"))
    }
}

impl ClusterAssignment {
    /// Returns `None` if any label is outside `[0, k)`.
    pub fn new(labels: Vec<usize>, k: usize) -> Option<Self> {
        if labels.iter().any(|&l| l >= k) {
            return None;
        }
        Some(Self { labels, k })
    }

    /// Caller guarantees every label is below `k`.
    pub(super) fn from_valid_labels(labels: Vec<usize>, k: usize) -> Self {
        debug_assert!(labels.iter().all(|&l| l < k));
        Self { labels, k }
    }

    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Label of the site at 0-based position `pos`.
    #[inline]
    pub fn label(&self, pos: usize) -> Option<usize> {
        self.labels.get(pos).copied()
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of sites per label, indexed by label.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k];
        for &l in &self.labels {
            sizes[l] += 1;
        }
        sizes
    }
}

/// Best k-means solution over all restarts.
#[derive(Debug, Clone)]
pub struct ClusterOutcome {
    pub assignment: ClusterAssignment,
    /// One centroid per label, in standardized feature space.
    pub centroids: Vec<Vec<f64>>,
    /// Within-cluster sum of squared distances of the winning restart.
    pub inertia: f64,
    /// Lloyd iterations the winning restart ran.
    pub iterations: usize,
    pub converged: bool,
    pub restarts: usize,
    /// Master seed; passing it back in reproduces this outcome.
    pub seed: u64,
    /// Wall time across all restarts. Advisory only.
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_label() {
        assert!(ClusterAssignment::new(vec![0, 2], 2).is_none());
    }

    #[test]
    fn sizes_count_empty_clusters() {
        let a = ClusterAssignment::new(vec![0, 0, 2], 3).unwrap();
        assert_eq!(a.cluster_sizes(), vec![2, 0, 1]);
        assert_eq!(a.label(2), Some(2));
        assert_eq!(a.label(3), None);
    }

    #[test]
    fn deserialize_rejects_out_of_range_label() {
        let err = serde_json::from_str::<ClusterAssignment>(r#"{"labels":[0,5],"k":2}"#)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn deserialize_roundtrips_valid_assignment() {
        let a = ClusterAssignment::new(vec![1, 0, 1], 3).unwrap();
        let back: ClusterAssignment =
            serde_json::from_str(&serde_json::to_string(&a).unwrap()).unwrap();
        assert_eq!(back, a);
        assert_eq!(back.cluster_sizes(), vec![1, 2, 0]);
    }
}
