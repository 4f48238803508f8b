//! k-means++ centroid seeding.

use rand::Rng;

use ratesplit_core::types::FeatureMatrix;

#[inline]
pub(super) fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Choose `k` initial centroids, returned row-major (`k * cols`).
///
/// The first centroid is a uniformly random site; each further one is a site
/// drawn with probability proportional to its squared distance from the
/// nearest centroid chosen so far. When every site already coincides with a
/// centroid (fewer distinct sites than `k`) the draw falls back to uniform,
/// which duplicates a centroid and leaves a cluster empty.
pub(super) fn kmeans_plus_plus<R: Rng>(matrix: &FeatureMatrix, k: usize, rng: &mut R) -> Vec<f64> {
    let n = matrix.rows();
    let mut centroids = Vec::with_capacity(k * matrix.cols());

    let first = rng.gen_range(0..n);
    centroids.extend_from_slice(matrix.row(first));

    let mut min_distances: Vec<f64> = matrix
        .iter_rows()
        .map(|row| squared_distance(row, matrix.row(first)))
        .collect();

    for _ in 1..k {
        let total: f64 = min_distances.iter().sum();
        let chosen = if total > 0.0 && total.is_finite() {
            weighted_pick(&min_distances, rng.gen::<f64>() * total)
        } else {
            rng.gen_range(0..n)
        };

        let centroid = matrix.row(chosen);
        centroids.extend_from_slice(centroid);
        for (d, row) in min_distances.iter_mut().zip(matrix.iter_rows()) {
            let dist = squared_distance(row, centroid);
            if dist < *d {
                *d = dist;
            }
        }
    }

    centroids
}

/// Index whose cumulative weight first exceeds `target`. Zero-weight entries
/// are never picked.
fn weighted_pick(weights: &[f64], target: f64) -> usize {
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = i;
        if cumulative > target {
            return i;
        }
    }
    // Rounding can leave target just past the final sum.
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn weighted_pick_skips_zero_weights() {
        let w = [0.0, 1.0, 0.0, 3.0];
        assert_eq!(weighted_pick(&w, 0.0), 1);
        assert_eq!(weighted_pick(&w, 0.5), 1);
        assert_eq!(weighted_pick(&w, 1.5), 3);
        assert_eq!(weighted_pick(&w, 4.0), 3);
    }

    #[test]
    fn seeds_distinct_points_when_available() {
        let m = FeatureMatrix::from_rows(&[[0.0], [0.0], [10.0], [10.0]]).unwrap();
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let c = kmeans_plus_plus(&m, 2, &mut rng);
        // The second draw has zero weight on the first centroid's twin.
        assert_ne!(c[0], c[1]);
    }

    #[test]
    fn duplicates_when_too_few_distinct_points() {
        let m = FeatureMatrix::from_rows(&[[1.0], [1.0], [1.0]]).unwrap();
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let c = kmeans_plus_plus(&m, 3, &mut rng);
        assert_eq!(c, vec![1.0, 1.0, 1.0]);
    }
}
