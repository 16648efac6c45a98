//! Hierarchical (agglomerative) clustering.
//!
//! Bottom-up clustering that builds a **dendrogram** by repeatedly merging
//! the two closest clusters until one remains. No k is needed up front: cut
//! the tree at any height afterwards.
//!
//! # Linkage Methods
//!
//! | Linkage | Formula | Effect |
//! |---------|---------|--------|
//! | Single | min(d(a,b)) for a∈A, b∈B | Chaining; elongated clusters |
//! | Complete | max(d(a,b)) | Compact, spherical clusters |
//! | Average | mean(d(a,b)) | Balanced compromise |
//!
//! Complete linkage is the default. All three are monotone: a merge is never
//! lower than the merges below it, so dendrogram heights never invert.
//!
//! # Merge Order
//!
//! Each round scans every unordered pair `(i, j)`, `i < j`, of the current
//! cluster list in row-major order and keeps the first pair with the
//! strictly smallest linkage distance. The merged node takes the slot of
//! cluster `j` and cluster `i` is removed, so every other cluster keeps its
//! relative position. Ties are therefore resolved by list position alone.
//! The merged node's children are `[cluster j, cluster i]`: the later slot
//! comes first.
//!
//! # Cost
//!
//! Record-to-record distances are computed once. A round costs
//! O(c² · m̄²) lookups for c current clusters of mean size m̄, and the full
//! run is O(n⁴) in the worst case. This is meant for small exploratory
//! datasets.

use super::traits::Clustering;
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::hierarchy::{Dendrogram, NodeId};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Linkage method for hierarchical clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Linkage {
    /// Single linkage: minimum distance between clusters.
    Single,
    /// Complete linkage: maximum distance between clusters.
    #[default]
    Complete,
    /// Average linkage: mean distance between clusters.
    Average,
}

impl Linkage {
    /// Distance between two clusters given by their record indices.
    pub fn distance(self, matrix: &DistanceMatrix, a: &[usize], b: &[usize]) -> f64 {
        let pairs = a
            .iter()
            .flat_map(|&i| b.iter().map(move |&j| matrix.get(i, j)));
        match self {
            Linkage::Single => pairs.fold(f64::INFINITY, f64::min),
            Linkage::Complete => pairs.fold(f64::NEG_INFINITY, f64::max),
            Linkage::Average => {
                let count = (a.len() * b.len()) as f64;
                pairs.sum::<f64>() / count
            }
        }
    }
}

impl std::str::FromStr for Linkage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(Linkage::Single),
            "complete" => Ok(Linkage::Complete),
            "average" => Ok(Linkage::Average),
            _ => Err(Error::InvalidParameter {
                name: "linkage",
                message: "expected one of: single, complete, average",
            }),
        }
    }
}

/// Hierarchical (agglomerative) clustering.
#[derive(Debug, Clone, Default)]
pub struct Agglomerative {
    /// Linkage method.
    linkage: Linkage,
    /// Cut height used by [`Clustering::fit_predict`].
    threshold: Option<f64>,
}

impl Agglomerative {
    /// Create a complete-link clusterer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set linkage method.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Set the cut height used to produce flat labels.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Fit and return the full dendrogram.
    ///
    /// Zero points give an empty dendrogram and one point a single leaf.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<Dendrogram> {
        let d = data.first().map_or(0, Vec::len);
        if let Some(p) = data.iter().find(|p| p.len() != d) {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: p.len(),
            });
        }

        let matrix = DistanceMatrix::new(data);
        let mut dendro = Dendrogram::from_leaves(data);
        let mut active: Vec<NodeId> = (0..data.len()).collect();

        while active.len() > 1 {
            let (i, j, height) = self.closest_pair(&dendro, &matrix, &active);
            let id = dendro.add_merge(active[j], active[i], height);
            log::debug!(
                "merge {} + {} -> {} at height {:.6} ({} clusters left)",
                active[j],
                active[i],
                id,
                height,
                active.len() - 1
            );
            active[j] = id;
            active.remove(i);
        }

        log::info!(
            "agglomerative clustering ({:?} linkage): {} records, {} merges",
            self.linkage,
            dendro.n_leaves(),
            dendro.n_merges()
        );
        Ok(dendro)
    }

    /// First pair `(i, j)`, `i < j`, in row-major order with minimum linkage distance.
    #[cfg(not(feature = "parallel"))]
    fn closest_pair(
        &self,
        dendro: &Dendrogram,
        matrix: &DistanceMatrix,
        active: &[NodeId],
    ) -> (usize, usize, f64) {
        let members = |id: NodeId| dendro.node(id).map_or(&[][..], |n| n.members());
        let mut best = (0, 1, f64::INFINITY);
        let mut found = false;
        for i in 0..active.len() {
            for j in (i + 1)..active.len() {
                let dist = self
                    .linkage
                    .distance(matrix, members(active[i]), members(active[j]));
                if !found || dist < best.2 {
                    best = (i, j, dist);
                    found = true;
                }
            }
        }
        best
    }

    /// First pair `(i, j)`, `i < j`, in row-major order with minimum linkage distance.
    #[cfg(feature = "parallel")]
    fn closest_pair(
        &self,
        dendro: &Dendrogram,
        matrix: &DistanceMatrix,
        active: &[NodeId],
    ) -> (usize, usize, f64) {
        let members = |id: NodeId| dendro.node(id).map_or(&[][..], |n| n.members());
        let c = active.len();
        (0..c)
            .into_par_iter()
            .flat_map_iter(|i| ((i + 1)..c).map(move |j| (i, j)))
            .map(|(i, j)| {
                let dist = self
                    .linkage
                    .distance(matrix, members(active[i]), members(active[j]));
                (i, j, dist)
            })
            .min_by(|a, b| a.2.total_cmp(&b.2).then((a.0, a.1).cmp(&(b.0, b.1))))
            .unwrap_or((0, 1, f64::INFINITY))
    }
}

impl Clustering for Agglomerative {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let dendro = self.fit(data)?;
        Ok(dendro.labels_at(self.threshold.unwrap_or(f64::INFINITY)))
    }

    fn n_clusters(&self) -> usize {
        0 // Determined by the cut height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::HealthCheck;

    fn four_points() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![5.0, 5.0],
            vec![5.0, 6.0],
        ]
    }

    #[test]
    fn test_complete_link_four_points() {
        let dendro = Agglomerative::new().fit(&four_points()).unwrap();

        assert_eq!(dendro.n_leaves(), 4);
        assert_eq!(dendro.n_merges(), 3);
        // {0,1} and {2,3} at 1.0, then the max cross distance (0,0)-(5,6).
        assert_eq!(dendro.heights(), vec![1.0, 1.0, 61f64.sqrt()]);
        assert_eq!(dendro.node(4).unwrap().children(), &[1, 0]);
        assert_eq!(dendro.node(5).unwrap().members(), &[3, 2]);
        assert_eq!(dendro.node(6).unwrap().members(), &[3, 2, 1, 0]);
        assert_eq!(dendro.cut(2.0), vec![5, 4]);
        assert_eq!(dendro.labels_at(2.0), vec![0, 0, 1, 1]);
        assert!(dendro.health_check().is_clean());
    }

    #[test]
    fn test_ties_resolved_by_list_position() {
        // (0,1) and (1,2) are both at distance 1.0.
        let data = vec![vec![0.0], vec![1.0], vec![2.0]];
        let dendro = Agglomerative::new().fit(&data).unwrap();
        // (0,1) is enumerated first; the merged node replaces record 1 and
        // so comes before record 2 in the next round.
        assert_eq!(dendro.node(3).unwrap().children(), &[1, 0]);
        assert_eq!(dendro.node(4).unwrap().children(), &[2, 3]);
        assert_eq!(dendro.heights(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_merged_node_takes_later_slot() {
        // 2 and 3 merge first; the new node replaces 3 in the list, so it is
        // enumerated after 0 and 1.
        let data = vec![vec![0.0], vec![10.0], vec![20.0], vec![20.5]];
        let dendro = Agglomerative::new().fit(&data).unwrap();
        assert_eq!(dendro.node(4).unwrap().children(), &[3, 2]);
        assert_eq!(dendro.node(5).unwrap().children(), &[1, 0]);
        assert_eq!(dendro.node(6).unwrap().children(), &[4, 5]);
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty = Agglomerative::new().fit(&[]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.root(), None);

        let single = Agglomerative::new().fit(&[vec![3.0, 4.0]]).unwrap();
        assert_eq!(single.root(), Some(0));
        assert_eq!(single.cut(-1.0), vec![0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            Agglomerative::new().fit(&data),
            Err(Error::DimensionMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_linkage_distances() {
        let points = four_points();
        let m = DistanceMatrix::new(&points);
        let a = [0, 1];
        let b = [2, 3];
        assert_eq!(Linkage::Complete.distance(&m, &a, &b), 61f64.sqrt());
        assert_eq!(Linkage::Single.distance(&m, &a, &b), 41f64.sqrt());
        assert_eq!(
            Linkage::Complete.distance(&m, &a, &b),
            Linkage::Complete.distance(&m, &b, &a)
        );
        let avg = (50f64.sqrt() + 61f64.sqrt() + 41f64.sqrt() + 50f64.sqrt()) / 4.0;
        assert!((Linkage::Average.distance(&m, &a, &b) - avg).abs() < 1e-12);
    }

    #[test]
    fn test_fit_predict_with_threshold() {
        let labels = Agglomerative::new()
            .with_threshold(2.0)
            .fit_predict(&four_points())
            .unwrap();
        assert_eq!(labels, vec![0, 0, 1, 1]);

        let labels = Agglomerative::new().fit_predict(&four_points()).unwrap();
        assert_eq!(labels, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_linkage_from_str() {
        assert_eq!("Complete".parse::<Linkage>().unwrap(), Linkage::Complete);
        assert_eq!("single".parse::<Linkage>().unwrap(), Linkage::Single);
        assert!("ward".parse::<Linkage>().is_err());
    }
}
