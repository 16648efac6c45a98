//! # cleave
//!
//! Two unsupervised partitioning algorithms over small tabular datasets:
//!
//! - complete-link agglomerative clustering, producing a dendrogram that can
//!   be cut at any height
//! - k-means, with convergence detection and per-cluster statistics
//!
//! Records are loaded from delimited text whose first row is a restriction
//! mask selecting the numeric columns that take part in distance; the other
//! columns ride along for display only. Results are returned as plain values
//! ([`Dendrogram`], [`KmeansFit`]); [`render`] turns them into text.
//!
//! ```rust
//! use cleave::{Agglomerative, Dataset, FixedIndices, Kmeans};
//!
//! let data = Dataset::from_reader("1,0,1\n0,a,0\n0,b,1\n5,c,5\n5,d,6\n".as_bytes()).unwrap();
//!
//! let tree = Agglomerative::new().fit(data.points()).unwrap();
//! assert_eq!(tree.cut(2.0).len(), 2);
//!
//! let fit = Kmeans::new(2).fit(data.points(), FixedIndices(vec![0, 2])).unwrap();
//! assert_eq!(fit.labels, vec![0, 0, 1, 1]);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod data;
pub mod distance;
/// Error types used across `cleave`.
pub mod error;
pub mod hierarchy;
pub mod render;

pub use cluster::{
    Agglomerative, ClusterStats, Clustering, FixedIndices, IndexSource, Kmeans, KmeansFit,
    KmeansRun, KmeansState, Linkage, RandomIndices, Warning,
};
pub use data::{ColumnKind, Dataset, Record, Schema, Value};
pub use distance::{euclidean, DistanceMatrix};
pub use error::{Error, Result};
pub use hierarchy::{Dendrogram, HealthCheck, HealthReport, Issue, Node, NodeContent, NodeId};
