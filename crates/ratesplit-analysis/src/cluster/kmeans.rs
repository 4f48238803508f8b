//! Multi-restart k-means driver.

use std::time::Instant;

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;
use ratesplit_core::config::ClusterConfig;
use ratesplit_core::errors::ClusterError;
use ratesplit_core::tracing::metrics;
use ratesplit_core::types::FeatureMatrix;
use statrs::statistics::Statistics;
use tracing::{debug, field, info, info_span};

use super::seeding::{kmeans_plus_plus, squared_distance};
use super::types::{ClusterAssignment, ClusterOutcome};

/// A validated k-means request.
///
/// Construction checks every parameter, so a `KMeans` value can always run.
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    restarts: usize,
    max_iterations: usize,
    tolerance: f64,
    parallelism: usize,
    seed: Option<u64>,
}

/// Result of one seeding + Lloyd run.
struct RestartRun {
    labels: Vec<usize>,
    /// Row-major, `k * cols`.
    centroids: Vec<f64>,
    inertia: f64,
    iterations: usize,
    converged: bool,
}

impl KMeans {
    /// Validate `k` and the clustering parameters.
    ///
    /// # Errors
    ///
    /// `InvalidK` for `k == 0`; `InvalidRestarts`, `InvalidMaxIterations` or
    /// `InvalidParallelism` for a zero count; `InvalidTolerance` for a
    /// negative or non-finite tolerance.
    pub fn new(k: usize, config: &ClusterConfig) -> Result<Self, ClusterError> {
        if k == 0 {
            return Err(ClusterError::InvalidK { k });
        }
        let restarts = config.effective_restarts();
        if restarts == 0 {
            return Err(ClusterError::InvalidRestarts);
        }
        let max_iterations = config.effective_max_iterations();
        if max_iterations == 0 {
            return Err(ClusterError::InvalidMaxIterations);
        }
        let tolerance = config.effective_tolerance();
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ClusterError::InvalidTolerance { tolerance });
        }
        let parallelism = config.effective_parallelism();
        if parallelism == 0 {
            return Err(ClusterError::InvalidParallelism);
        }

        Ok(Self {
            k,
            restarts,
            max_iterations,
            tolerance,
            parallelism,
            seed: config.seed,
        })
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// Cluster the rows of `matrix`, keeping the lowest-inertia restart.
    ///
    /// Labels in the outcome are renumbered by first appearance in row order,
    /// so equal partitions always carry equal labels.
    pub fn fit(&self, matrix: &FeatureMatrix) -> Result<ClusterOutcome, ClusterError> {
        if matrix.is_empty() {
            return Err(ClusterError::EmptyMatrix);
        }
        if self.k > matrix.rows() {
            return Err(ClusterError::TooFewSites {
                k: self.k,
                sites: matrix.rows(),
            });
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        let span = info_span!(
            "kmeans",
            k = self.k,
            restarts = self.restarts,
            seed,
            kmeans_time = field::Empty,
            kmeans_inertia = field::Empty,
        );
        let _guard = span.enter();
        let start = Instant::now();

        let mut master = Xoshiro256StarStar::seed_from_u64(seed);
        let restart_seeds: Vec<u64> = (0..self.restarts).map(|_| master.next_u64()).collect();
        let tolerance = self.tolerance * mean_column_variance(matrix);

        // Ties on inertia go to the earlier restart, keeping the winner
        // independent of thread scheduling.
        let better = |a: &(usize, RestartRun), b: &(usize, RestartRun)| {
            a.1.inertia.total_cmp(&b.1.inertia).then(a.0.cmp(&b.0))
        };

        let best = if self.parallelism > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.parallelism)
                .build()
                .map_err(|e| ClusterError::ThreadPool {
                    message: e.to_string(),
                })?;
            pool.install(|| {
                restart_seeds
                    .par_iter()
                    .enumerate()
                    .map(|(i, &s)| (i, self.run_once(matrix, s, tolerance)))
                    .min_by(better)
            })
        } else {
            restart_seeds
                .iter()
                .enumerate()
                .map(|(i, &s)| (i, self.run_once(matrix, s, tolerance)))
                .min_by(better)
        };
        let (best_restart, best) = best.ok_or(ClusterError::InvalidRestarts)?;

        let mut labels = best.labels;
        let mut centroids: Vec<Vec<f64>> = best
            .centroids
            .chunks_exact(matrix.cols())
            .map(<[f64]>::to_vec)
            .collect();
        canonicalize_labels(&mut labels, &mut centroids);

        let elapsed = start.elapsed();
        span.record(metrics::KMEANS_TIME, elapsed.as_millis() as u64);
        span.record(metrics::KMEANS_INERTIA, best.inertia);
        info!(
            best_restart,
            inertia = best.inertia,
            iterations = best.iterations,
            converged = best.converged,
            "k-means took {:.3} seconds",
            elapsed.as_secs_f64()
        );

        Ok(ClusterOutcome {
            assignment: ClusterAssignment::from_valid_labels(labels, self.k),
            centroids,
            inertia: best.inertia,
            iterations: best.iterations,
            converged: best.converged,
            restarts: self.restarts,
            seed,
            elapsed,
        })
    }

    /// One k-means++ seeding followed by Lloyd iterations.
    fn run_once(&self, matrix: &FeatureMatrix, seed: u64, tolerance: f64) -> RestartRun {
        let k = self.k;
        let cols = matrix.cols();
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut centroids = kmeans_plus_plus(matrix, k, &mut rng);

        let mut labels = vec![usize::MAX; matrix.rows()];
        let mut sums = vec![0.0; k * cols];
        let mut counts = vec![0usize; k];
        let mut iterations = 0;
        let mut converged = false;

        for iteration in 1..=self.max_iterations {
            iterations = iteration;
            let (_, changed) = assign(matrix, &centroids, k, &mut labels);

            sums.fill(0.0);
            counts.fill(0);
            for (row, &label) in matrix.iter_rows().zip(&labels) {
                counts[label] += 1;
                for (sum, value) in sums[label * cols..(label + 1) * cols].iter_mut().zip(row) {
                    *sum += value;
                }
            }

            let mut shift = 0.0;
            for (c, &count) in counts.iter().enumerate() {
                if count == 0 {
                    // Empty cluster keeps its centroid.
                    continue;
                }
                for d in c * cols..(c + 1) * cols {
                    let updated = sums[d] / count as f64;
                    let delta = updated - centroids[d];
                    shift += delta * delta;
                    centroids[d] = updated;
                }
            }

            if !changed || shift <= tolerance {
                converged = true;
                break;
            }
        }

        let (inertia, _) = assign(matrix, &centroids, k, &mut labels);
        debug!(seed, iterations, converged, inertia, "restart finished");

        RestartRun {
            labels,
            centroids,
            inertia,
            iterations,
            converged,
        }
    }
}

/// Assign every row to its nearest centroid (lowest index on ties).
/// Returns the inertia and whether any label changed.
fn assign(matrix: &FeatureMatrix, centroids: &[f64], k: usize, labels: &mut [usize]) -> (f64, bool) {
    let cols = matrix.cols();
    let mut inertia = 0.0;
    let mut changed = false;

    for (row, label) in matrix.iter_rows().zip(labels.iter_mut()) {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for c in 0..k {
            let distance = squared_distance(row, &centroids[c * cols..(c + 1) * cols]);
            if distance < best_distance {
                best = c;
                best_distance = distance;
            }
        }
        if *label != best {
            *label = best;
            changed = true;
        }
        inertia += best_distance;
    }

    (inertia, changed)
}

fn mean_column_variance(matrix: &FeatureMatrix) -> f64 {
    let total: f64 = (0..matrix.cols())
        .map(|c| matrix.column(c).population_variance())
        .sum();
    total / matrix.cols() as f64
}

/// Renumber labels by first appearance in row order; unused labels follow
/// in their previous order. Centroids are permuted to match.
fn canonicalize_labels(labels: &mut [usize], centroids: &mut Vec<Vec<f64>>) {
    let k = centroids.len();
    let mut mapping = vec![usize::MAX; k];
    let mut next = 0;

    for &label in labels.iter() {
        if mapping[label] == usize::MAX {
            mapping[label] = next;
            next += 1;
            if next == k {
                break;
            }
        }
    }
    for slot in mapping.iter_mut().filter(|m| **m == usize::MAX) {
        *slot = next;
        next += 1;
    }

    for label in labels.iter_mut() {
        *label = mapping[*label];
    }
    let mut reordered = vec![Vec::new(); k];
    for (old, centroid) in centroids.drain(..).enumerate() {
        reordered[mapping[old]] = centroid;
    }
    *centroids = reordered;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(restarts: usize, seed: u64) -> ClusterConfig {
        ClusterConfig {
            restarts: Some(restarts),
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn two_groups() -> FeatureMatrix {
        FeatureMatrix::from_rows(&[
            [0.0, 0.1],
            [5.0, 5.1],
            [0.2, 0.0],
            [5.2, 4.9],
            [0.1, 0.2],
        ])
        .unwrap()
    }

    #[test]
    fn zero_k_rejected_up_front() {
        assert!(matches!(
            KMeans::new(0, &ClusterConfig::default()),
            Err(ClusterError::InvalidK { k: 0 })
        ));
    }

    #[test]
    fn zero_restarts_rejected() {
        let cfg = ClusterConfig {
            restarts: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            KMeans::new(2, &cfg),
            Err(ClusterError::InvalidRestarts)
        ));
    }

    #[test]
    fn zero_iteration_cap_rejected() {
        let cfg = ClusterConfig {
            max_iterations: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            KMeans::new(2, &cfg),
            Err(ClusterError::InvalidMaxIterations)
        ));
    }

    #[test]
    fn bad_tolerance_rejected() {
        for tolerance in [-1e-4, f64::NAN, f64::INFINITY] {
            let cfg = ClusterConfig {
                tolerance: Some(tolerance),
                ..Default::default()
            };
            assert!(
                matches!(KMeans::new(2, &cfg), Err(ClusterError::InvalidTolerance { .. })),
                "tolerance {tolerance} accepted"
            );
        }
        let zero = ClusterConfig {
            tolerance: Some(0.0),
            ..Default::default()
        };
        assert!(KMeans::new(2, &zero).is_ok());
    }

    #[test]
    fn k_above_site_count_rejected() {
        let km = KMeans::new(6, &config(5, 1)).unwrap();
        assert!(matches!(
            km.fit(&two_groups()),
            Err(ClusterError::TooFewSites { k: 6, sites: 5 })
        ));
    }

    #[test]
    fn separates_two_groups_with_canonical_labels() {
        let outcome = KMeans::new(2, &config(10, 7)).unwrap().fit(&two_groups()).unwrap();
        assert_eq!(outcome.assignment.labels(), &[0, 1, 0, 1, 0]);
        assert!(outcome.converged);
        assert!((outcome.centroids[0][0] - 0.1).abs() < 1e-9);
        assert!((outcome.centroids[1][0] - 5.1).abs() < 1e-9);
    }

    #[test]
    fn more_clusters_than_distinct_points_leaves_empty_cluster() {
        let m = FeatureMatrix::from_rows(&[[0.0], [0.0], [3.0]]).unwrap();
        let outcome = KMeans::new(3, &config(5, 11)).unwrap().fit(&m).unwrap();
        let sizes = outcome.assignment.cluster_sizes();
        assert_eq!(sizes.iter().sum::<usize>(), 3);
        assert_eq!(sizes, vec![2, 1, 0]);
        assert_eq!(outcome.centroids.len(), 3);
        assert!(outcome.inertia.abs() < 1e-12);
    }

    #[test]
    fn same_seed_same_outcome() {
        let m = two_groups();
        let a = KMeans::new(3, &config(20, 99)).unwrap().fit(&m).unwrap();
        let b = KMeans::new(3, &config(20, 99)).unwrap().fit(&m).unwrap();
        assert_eq!(a.assignment, b.assignment);
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.inertia, b.inertia);
    }

    #[test]
    fn parallel_restarts_match_sequential() {
        let m = two_groups();
        let sequential = KMeans::new(3, &config(16, 5)).unwrap().fit(&m).unwrap();
        let parallel_cfg = ClusterConfig {
            parallelism: Some(4),
            ..config(16, 5)
        };
        let parallel = KMeans::new(3, &parallel_cfg).unwrap().fit(&m).unwrap();
        assert_eq!(sequential.assignment, parallel.assignment);
        assert_eq!(sequential.centroids, parallel.centroids);
    }

    #[test]
    fn canonicalize_orders_by_first_appearance() {
        let mut labels = vec![2, 2, 0, 1];
        let mut centroids = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        canonicalize_labels(&mut labels, &mut centroids);
        assert_eq!(labels, vec![0, 0, 1, 2]);
        assert_eq!(centroids, vec![vec![2.0], vec![0.0], vec![1.0], vec![3.0]]);
    }
}
