//! Clustering traits.

use crate::error::Result;

/// Trait for hard clustering algorithms.
pub trait Clustering {
    /// Fit the model to data and return cluster assignments.
    ///
    /// Returns a vector of cluster labels, one per input point.
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>>;

    /// Get the number of clusters.
    ///
    /// Returns 0 when the count is only known after fitting.
    fn n_clusters(&self) -> usize;
}
