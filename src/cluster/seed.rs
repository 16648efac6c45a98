//! Initial-centroid selection.
//!
//! K-means starts from `k` distinct records chosen as centroids. The choice is
//! injected through [`IndexSource`] rather than drawn from global random state,
//! so a fixed seed (or a fixed list) always reproduces the same run.

use rand::prelude::*;

/// A source of distinct record indices.
pub trait IndexSource {
    /// Return `k` indices, intended to be distinct and in `0..n`.
    ///
    /// The caller guarantees `1 <= k <= n` and validates the result.
    fn distinct_indices(&mut self, n: usize, k: usize) -> Vec<usize>;
}

/// Uniform sampling without replacement from a random number generator.
#[derive(Debug, Clone)]
pub struct RandomIndices<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomIndices<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomIndices<StdRng> {
    /// Deterministic source for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> IndexSource for RandomIndices<R> {
    fn distinct_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, n, k).into_vec()
    }
}

/// A fixed list of indices, returned as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIndices(pub Vec<usize>);

impl IndexSource for FixedIndices {
    fn distinct_indices(&mut self, _n: usize, k: usize) -> Vec<usize> {
        self.0.iter().copied().take(k).collect()
    }
}

impl<S: IndexSource + ?Sized> IndexSource for &mut S {
    fn distinct_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        (**self).distinct_indices(n, k)
    }
}
