//! Partition builder: per-site cluster labels → per-cluster site lists.
//!
//! Pure restructuring. Site position `i` becomes 1-based site index `i + 1`,
//! lists come out ascending, and every index in `1..=N` lands in exactly one
//! list. Singleton and empty clusters are kept as they are; deciding whether
//! to reject them is up to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cluster::{ClusterAssignment, ClusterOutcome};

/// Sites grouped by cluster, plus the cluster centroids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    /// Label → ascending 1-based site indices. Only labels with sites appear.
    sites_by_cluster: BTreeMap<usize, Vec<usize>>,
    /// One centroid per label, index-aligned with labels.
    centroids: Vec<Vec<f64>>,
}

/// Build a partition from per-site labels and the matching centroids.
pub fn build_partition(assignment: &ClusterAssignment, centroids: Vec<Vec<f64>>) -> Partition {
    let mut sites_by_cluster: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (pos, &label) in assignment.labels().iter().enumerate() {
        sites_by_cluster.entry(label).or_default().push(pos + 1);
    }
    Partition {
        sites_by_cluster,
        centroids,
    }
}

impl From<ClusterOutcome> for Partition {
    fn from(outcome: ClusterOutcome) -> Self {
        build_partition(&outcome.assignment, outcome.centroids)
    }
}

impl Partition {
    /// Site indices of one cluster; `None` for unknown or empty labels.
    pub fn sites(&self, label: usize) -> Option<&[usize]> {
        self.sites_by_cluster.get(&label).map(Vec::as_slice)
    }

    /// Non-empty clusters in label order.
    pub fn clusters(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.sites_by_cluster
            .iter()
            .map(|(&label, sites)| (label, sites.as_slice()))
    }

    /// Site lists in label order, ready for splitting an alignment subset.
    pub fn subsets(&self) -> Vec<&[usize]> {
        self.sites_by_cluster.values().map(Vec::as_slice).collect()
    }

    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    pub fn centroid(&self, label: usize) -> Option<&[f64]> {
        self.centroids.get(label).map(Vec::as_slice)
    }

    /// Requested cluster count K, including empty clusters.
    pub fn num_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Clusters holding at least one site.
    pub fn occupied_clusters(&self) -> usize {
        self.sites_by_cluster.len()
    }

    pub fn site_count(&self) -> usize {
        self.sites_by_cluster.values().map(Vec::len).sum()
    }

    /// Labels of clusters holding exactly one site.
    pub fn singleton_clusters(&self) -> Vec<usize> {
        self.sites_by_cluster
            .iter()
            .filter(|(_, sites)| sites.len() == 1)
            .map(|(&label, _)| label)
            .collect()
    }

    /// Labels in `[0, K)` that received no site.
    pub fn empty_clusters(&self) -> Vec<usize> {
        (0..self.num_clusters())
            .filter(|label| !self.sites_by_cluster.contains_key(label))
            .collect()
    }

    /// Cluster label of a 1-based site index.
    pub fn label_of(&self, site: usize) -> Option<usize> {
        self.sites_by_cluster
            .iter()
            .find(|(_, sites)| sites.binary_search(&site).is_ok())
            .map(|(&label, _)| label)
    }

    /// JSON form: `{"sites_by_cluster": {"0": [1, 3]}, "centroids": [[..]]}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
