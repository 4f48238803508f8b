//! K-means clustering of standardized site features.
//!
//! # Algorithm
//!
//! 1. Seed k centroids with k-means++ (distance-weighted sampling)
//! 2. Assign each site to its nearest centroid (squared Euclidean)
//! 3. Move each centroid to the mean of its sites; an empty cluster keeps
//!    its previous centroid
//! 4. Repeat until the total squared centroid shift drops below tolerance,
//!    labels stop changing, or the iteration cap is hit
//!
//! The whole procedure is restarted from many independent seedings and the
//! lowest-inertia run wins. Restart seeds derive from one master seed, so a
//! run replays exactly given that seed, whatever the thread count.

mod kmeans;
mod seeding;
mod types;

pub use kmeans::KMeans;
pub use types::{ClusterAssignment, ClusterOutcome};
