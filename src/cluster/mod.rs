//! Clustering algorithms.
//!
//! ## Algorithms
//!
//! ### Hierarchical (Agglomerative) Clustering
//!
//! Bottom-up: start with each record as its own cluster, repeatedly merge
//! the two closest clusters until one remains. The merge history forms a
//! **dendrogram**, a binary tree you can cut at any height to get a flat
//! partition.
//!
//! **When to use**: exploring cluster structure at several granularities, or
//! when k is unknown. Quartic in the worst case; keep datasets small.
//!
//! ### K-means
//!
//! The classic algorithm: assign each record to the nearest centroid, then
//! update centroids to the mean of their records. Repeat until the partition
//! stops changing.
//!
//! **Objective**: Minimize the sum of squared errors:
//!
//! ```text
//! SSE = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **When to use**: you know k and the clusters are roughly spherical.
//!
//! ## Usage
//!
//! ```rust
//! use cleave::cluster::{Agglomerative, Clustering, FixedIndices, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![5.0, 5.0],
//!     vec![5.0, 6.0],
//! ];
//!
//! // K-means from explicit seeds
//! let fit = Kmeans::new(2).fit(&data, FixedIndices(vec![0, 2])).unwrap();
//! assert_eq!(fit.partition, vec![vec![0, 1], vec![2, 3]]);
//!
//! // Complete-link dendrogram, cut at height 2
//! let tree = Agglomerative::new().fit(&data).unwrap();
//! assert_eq!(tree.labels_at(2.0), vec![0, 0, 1, 1]);
//!
//! // Same thing through the common trait
//! let labels = Agglomerative::new().with_threshold(2.0).fit_predict(&data).unwrap();
//! assert_eq!(labels, vec![0, 0, 1, 1]);
//! ```

mod agglomerative;
mod kmeans;
mod seed;
mod traits;

pub use agglomerative::{Agglomerative, Linkage};
pub use kmeans::{ClusterStats, Kmeans, KmeansFit, KmeansRun, KmeansState, Warning, DEFAULT_MAX_ITER};
pub use seed::{FixedIndices, IndexSource, RandomIndices};
pub use traits::Clustering;
