//! K-means clustering.
//!
//! Partitions records into k clusters by minimizing the **sum of squared
//! errors** (SSE) between records and their cluster centroid.
//!
//! # Lloyd's Algorithm
//!
//! 1. **Initialize**: pick k distinct records as centroids (via an [`IndexSource`])
//! 2. **Assign**: each record → nearest centroid (ties go to the lowest index)
//! 3. If no cluster's membership changed, stop: the partition is a fixed point
//! 4. **Update**: each non-empty cluster's centroid → mean of its members
//! 5. Repeat from 2
//!
//! ```text
//! SSE = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! Each assignment and each update either lowers SSE or leaves it unchanged,
//! so SSE is non-increasing across iterations.
//!
//! # Empty Clusters
//!
//! A cluster that receives no members keeps its previous centroid. The
//! centroid is never re-seeded, so it can stay unused for the rest of the run.
//! Each occurrence is recorded as a [`Warning`] and logged at `warn` level.
//!
//! # Termination
//!
//! Floating-point edge cases can make Lloyd's iteration cycle between
//! equal-cost partitions, so runs are capped at `max_iter` passes and report
//! [`Error::NonConvergence`] past the cap.

use super::seed::{IndexSource, RandomIndices};
use super::traits::Clustering;
use crate::distance::euclidean;
use crate::error::{Error, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default cap on assignment passes.
pub const DEFAULT_MAX_ITER: usize = 300;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum assignment passes, including the one that detects convergence.
    max_iter: usize,
    /// Random seed used by [`Clustering::fit_predict`].
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of clusters requested.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Validate inputs, choose initial centroids, and return a run ready to iterate.
    pub fn start<'a, S: IndexSource>(
        &self,
        points: &'a [Vec<f64>],
        mut source: S,
    ) -> Result<KmeansRun<'a>> {
        let n = points.len();
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidK {
                k: self.k,
                n_records: n,
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        let d = points[0].len();
        if let Some(p) = points.iter().find(|p| p.len() != d) {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: p.len(),
            });
        }

        let seeds = source.distinct_indices(n, self.k);
        let mut seen = vec![false; n];
        for &index in &seeds {
            if index >= n || std::mem::replace(&mut seen[index], true) {
                return Err(Error::InvalidSeed { index, n_records: n });
            }
        }
        if seeds.len() != self.k {
            return Err(Error::InvalidParameter {
                name: "source",
                message: "index source did not return k indices",
            });
        }
        log::debug!("k-means seeded with records {:?}", seeds);

        Ok(KmeansRun {
            points,
            centroids: seeds.iter().map(|&i| points[i].clone()).collect(),
            partition: vec![Vec::new(); self.k],
            labels: vec![0; n],
            state: KmeansState::Iterating,
            iterations: 0,
            warnings: Vec::new(),
        })
    }

    /// Run to convergence from centroids chosen by `source`.
    pub fn fit<S: IndexSource>(&self, points: &[Vec<f64>], source: S) -> Result<KmeansFit> {
        let mut run = self.start(points, source)?;
        while run.state() == KmeansState::Iterating {
            if run.iterations() >= self.max_iter {
                return Err(Error::NonConvergence {
                    iterations: run.iterations(),
                });
            }
            run.step();
        }
        let fit = run.finish();
        log::info!(
            "k-means converged: k={} iterations={} sse={:.6}",
            self.k,
            fit.iterations,
            fit.total_sse()
        );
        Ok(fit)
    }

    /// Run to convergence from a seeded random initialization.
    pub fn fit_seeded(&self, points: &[Vec<f64>], seed: u64) -> Result<KmeansFit> {
        self.fit(points, RandomIndices::seeded(seed))
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let fit = match self.seed {
            Some(s) => self.fit(data, RandomIndices::seeded(s))?,
            None => self.fit(data, RandomIndices::from_entropy())?,
        };
        Ok(fit.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Progress of a k-means run.
///
/// There are no `Uninitialized` or `Initializing` states: validation and
/// seeding happen atomically inside [`Kmeans::start`], so a [`KmeansRun`] is
/// only ever observed iterating or converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KmeansState {
    /// Assignment passes still change the partition.
    Iterating,
    /// The last assignment pass reproduced the previous partition.
    Converged,
}

/// Non-fatal conditions met while iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// A centroid received no members and kept its previous value.
    EmptyClusterOnUpdate {
        /// Cluster index.
        cluster: usize,
        /// 1-based iteration.
        iteration: usize,
    },
}

/// An in-progress k-means run. Owns the centroids and the partition.
#[derive(Debug, Clone)]
pub struct KmeansRun<'a> {
    points: &'a [Vec<f64>],
    centroids: Vec<Vec<f64>>,
    partition: Vec<Vec<usize>>,
    labels: Vec<usize>,
    state: KmeansState,
    iterations: usize,
    warnings: Vec<Warning>,
}

impl KmeansRun<'_> {
    /// Current state.
    pub fn state(&self) -> KmeansState {
        self.state
    }

    /// Assignment passes performed so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Current centroids.
    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    /// Current partition: member record indices per cluster, ascending.
    pub fn partition(&self) -> &[Vec<usize>] {
        &self.partition
    }

    /// Current SSE of the partition against the centroids.
    pub fn sse(&self) -> f64 {
        self.partition
            .iter()
            .zip(&self.centroids)
            .map(|(members, c)| {
                members
                    .iter()
                    .map(|&i| euclidean(&self.points[i], c).powi(2))
                    .sum::<f64>()
            })
            .sum()
    }

    /// Perform one assignment pass and, unless it converged, one update.
    pub fn step(&mut self) -> KmeansState {
        if self.state == KmeansState::Converged {
            return self.state;
        }
        self.iterations += 1;

        let labels = assign(self.points, &self.centroids);
        let mut partition = vec![Vec::new(); self.centroids.len()];
        for (i, &c) in labels.iter().enumerate() {
            partition[c].push(i);
        }

        let changed = partition
            .iter()
            .zip(&self.partition)
            .filter(|(new, old)| new != old)
            .count();
        if changed == 0 {
            self.state = KmeansState::Converged;
            log::debug!("k-means iteration {}: partition stable", self.iterations);
            return self.state;
        }
        self.partition = partition;
        self.labels = labels;
        self.update_centroids();

        log::debug!(
            "k-means iteration {}: {} clusters changed, sse={:.6}",
            self.iterations,
            changed,
            self.sse()
        );
        self.state
    }

    fn update_centroids(&mut self) {
        for (cluster, members) in self.partition.iter().enumerate() {
            if members.is_empty() {
                log::warn!(
                    "k-means iteration {}: cluster {} is empty, keeping its centroid",
                    self.iterations,
                    cluster
                );
                self.warnings.push(Warning::EmptyClusterOnUpdate {
                    cluster,
                    iteration: self.iterations,
                });
                continue;
            }
            let centroid = &mut self.centroids[cluster];
            centroid.iter_mut().for_each(|x| *x = 0.0);
            for &i in members {
                for (c, x) in centroid.iter_mut().zip(&self.points[i]) {
                    *c += x;
                }
            }
            let count = members.len() as f64;
            centroid.iter_mut().for_each(|x| *x /= count);
        }
    }

    /// Freeze the run into a result with per-cluster statistics.
    pub fn finish(self) -> KmeansFit {
        let stats = self
            .partition
            .iter()
            .zip(&self.centroids)
            .map(|(members, c)| ClusterStats::compute(self.points, members, c))
            .collect();
        KmeansFit {
            centroids: self.centroids,
            partition: self.partition,
            labels: self.labels,
            iterations: self.iterations,
            converged: self.state == KmeansState::Converged,
            warnings: self.warnings,
            stats,
        }
    }
}

/// Index of the nearest centroid; the first strictly smaller distance wins.
fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best_cluster = 0;
    let mut best_dist = f64::INFINITY;
    for (k, centroid) in centroids.iter().enumerate() {
        let dist = euclidean(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_cluster = k;
        }
    }
    best_cluster
}

#[cfg(feature = "parallel")]
fn assign(points: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    points.par_iter().map(|p| nearest(p, centroids)).collect()
}

#[cfg(not(feature = "parallel"))]
fn assign(points: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    points.iter().map(|p| nearest(p, centroids)).collect()
}

/// Distance summary of one cluster against its centroid.
///
/// An empty cluster reports `size == 0` and zeros for every distance.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterStats {
    /// Number of members.
    pub size: usize,
    /// Centroid.
    pub center: Vec<f64>,
    /// Largest member-to-centroid distance.
    pub max_distance: f64,
    /// Smallest member-to-centroid distance.
    pub min_distance: f64,
    /// Mean member-to-centroid distance.
    pub avg_distance: f64,
    /// Sum of squared member-to-centroid distances.
    pub sse: f64,
}

impl ClusterStats {
    fn compute(points: &[Vec<f64>], members: &[usize], center: &[f64]) -> Self {
        let mut stats = Self {
            size: members.len(),
            center: center.to_vec(),
            max_distance: 0.0,
            min_distance: 0.0,
            avg_distance: 0.0,
            sse: 0.0,
        };
        if members.is_empty() {
            return stats;
        }
        let mut min = f64::INFINITY;
        let mut sum = 0.0;
        for &i in members {
            let d = euclidean(center, &points[i]);
            stats.max_distance = stats.max_distance.max(d);
            min = min.min(d);
            sum += d;
            stats.sse += d * d;
        }
        stats.min_distance = min;
        stats.avg_distance = sum / members.len() as f64;
        stats
    }

    /// Centroid as comma-separated values.
    pub fn center_string(&self) -> String {
        self.center
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Result of a k-means run.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// Final centroids.
    pub centroids: Vec<Vec<f64>>,
    /// Member record indices per cluster, ascending.
    pub partition: Vec<Vec<usize>>,
    /// Cluster label per record.
    pub labels: Vec<usize>,
    /// Assignment passes performed, including the one that detected convergence.
    pub iterations: usize,
    /// Whether the run reached a fixed point.
    pub converged: bool,
    /// Empty-cluster events met along the way.
    pub warnings: Vec<Warning>,
    /// Per-cluster statistics, indexed like `centroids`.
    pub stats: Vec<ClusterStats>,
}

impl KmeansFit {
    /// Total SSE across clusters.
    pub fn total_sse(&self) -> f64 {
        self.stats.iter().map(|s| s.sse).sum()
    }

    /// Assign each point to its nearest final centroid.
    pub fn predict(&self, points: &[Vec<f64>]) -> Vec<usize> {
        assign(points, &self.centroids)
    }
}
