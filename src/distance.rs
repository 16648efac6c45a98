//! Euclidean distance over numeric-active dimensions.
//!
//! Every engine in this crate measures records through the same projection
//! (the numeric-active columns of the restriction mask), so both arguments
//! always have the same length. A length mismatch is a caller bug and is only
//! checked in debug builds.

/// Squared Euclidean distance.
#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance: `sqrt(Σ(aᵢ−bᵢ)²)`.
#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Pairwise record distances, stored as the condensed upper triangle.
///
/// Entry `(i, j)` with `i < j` lives at row-major offset
/// `n*i - i*(i+1)/2 + (j - i - 1)`; the diagonal is implicitly zero.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    condensed: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute all pairwise Euclidean distances between `points`.
    pub fn new(points: &[Vec<f64>]) -> Self {
        let n = points.len();
        let mut condensed = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for row in 0..n.saturating_sub(1) {
            for col in (row + 1)..n {
                condensed.push(euclidean(&points[row], &points[col]));
            }
        }
        Self { n, condensed }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True when built from no points.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between points `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.condensed[self.n * lo - lo * (lo + 1) / 2 + (hi - lo - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_three_four_five() {
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(squared_euclidean(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
    }

    #[test]
    fn test_euclidean_empty_vectors() {
        assert_eq!(euclidean(&[], &[]), 0.0);
    }

    #[test]
    fn test_matrix_matches_direct_distance() {
        let points = vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![5.0, 5.0],
            vec![5.0, 6.0],
        ];
        let m = DistanceMatrix::new(&points);
        assert_eq!(m.len(), 4);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m.get(i, j), euclidean(&points[i], &points[j]));
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn test_matrix_degenerate_sizes() {
        assert!(DistanceMatrix::new(&[]).is_empty());
        let single = DistanceMatrix::new(&[vec![1.0]]);
        assert_eq!(single.len(), 1);
        assert_eq!(single.get(0, 0), 0.0);
    }
}
