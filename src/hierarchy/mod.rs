//! Dendrogram data model.
//!
//! A dendrogram records the merge history of agglomerative clustering as a
//! binary tree. Each internal node carries the height (linkage distance) at
//! which its two children were joined:
//!
//! ```text
//!            ┌───────────┐        h = 7.81
//!        ┌───┴───┐   ┌───┴───┐    h = 1.00
//!        0       1   2       3    h = 0 (leaves)
//! ```
//!
//! Cutting the tree with a horizontal line at height `t` keeps every
//! maximal subtree whose height is `<= t`, yielding a flat partition.
//!
//! - [`Node`]: leaf (one record) or merge (two children)
//! - [`Dendrogram`]: append-only arena of nodes, plus cut operations
//! - [`HealthCheck`]: structural validation of a finished tree

mod dendrogram;
mod node;
mod validate;

pub use dendrogram::Dendrogram;
pub use node::{Node, NodeContent, NodeId};
pub use validate::{HealthCheck, HealthReport, Issue, HEIGHT_TOLERANCE};
