//! Dendrogram validation and health checking.
//!
//! Verifies the structural invariants every dendrogram built by this crate
//! should satisfy:
//! - one leaf per record, at height 0, in record order
//! - every merge node has exactly two children created before it
//! - every non-root node has exactly one parent
//! - a node's membership is the concatenation of its children's
//! - heights never decrease from a child to its parent
//!
//! # Example
//!
//! ```rust
//! use cleave::{Agglomerative, HealthCheck};
//!
//! let points = vec![vec![0.0], vec![1.0], vec![4.0]];
//! let tree = Agglomerative::new().fit(&points).unwrap();
//!
//! let report = tree.health_check();
//! assert!(report.is_healthy(), "{report}");
//! ```

use std::collections::HashMap;

use super::{Dendrogram, NodeId};

/// Absolute slack allowed when comparing parent and child heights.
pub const HEIGHT_TOLERANCE: f64 = 1e-9;

/// A structural defect found by [`HealthCheck::health_check`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Issue {
    #[error("leaf {node} is out of record order (holds record {record:?})")]
    LeafOutOfOrder { node: NodeId, record: Option<usize> },

    #[error("leaf {node} has non-zero height {height}")]
    LeafHeight { node: NodeId, height: f64 },

    #[error("leaf {node} stored in merge region")]
    LeafInMergeRegion { node: NodeId },

    #[error("merge {node} has non-finite height")]
    NonFiniteHeight { node: NodeId },

    #[error("merge {node} refers to child {child} not created before it")]
    ChildAfterParent { node: NodeId, child: NodeId },

    #[error("node {node} has parents {first} and {second}")]
    MultipleParents {
        node: NodeId,
        first: NodeId,
        second: NodeId,
    },

    #[error("height inversion: merge {node} is lower than child {child}")]
    HeightInversion { node: NodeId, child: NodeId },

    #[error("merge {node} membership is not the union of its children")]
    Membership { node: NodeId },

    #[error("orphaned node {node}")]
    Orphan { node: NodeId },

    /// Expected while clustering is still running.
    #[error("root covers {covered} of {n_records} records")]
    PartialRoot { covered: usize, n_records: usize },
}

impl Issue {
    /// Whether the tree is unusable for cutting.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Issue::PartialRoot { .. })
    }
}

/// Health report for a dendrogram.
#[derive(Debug, Clone, Default)]
pub struct HealthReport {
    pub issues: Vec<Issue>,
    pub node_count: usize,
    pub leaf_count: usize,
    /// Longest root-to-leaf path, in edges.
    pub max_depth: usize,
    /// Height of the root (0.0 when empty).
    pub root_height: f64,
}

impl HealthReport {
    /// No fatal issues.
    pub fn is_healthy(&self) -> bool {
        !self.issues.iter().any(Issue::is_fatal)
    }

    /// No issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl std::fmt::Display for HealthReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes ({} leaves), depth {}, root height {:.3}",
            self.node_count, self.leaf_count, self.max_depth, self.root_height
        )?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}

/// Trait for types that can be health-checked.
pub trait HealthCheck {
    /// Perform a health check and return a report.
    fn health_check(&self) -> HealthReport;

    /// Quick check: returns true if healthy.
    fn is_healthy(&self) -> bool {
        self.health_check().is_healthy()
    }
}

impl HealthCheck for Dendrogram {
    fn health_check(&self) -> HealthReport {
        let mut report = HealthReport {
            node_count: self.len(),
            leaf_count: self.n_leaves(),
            ..Default::default()
        };
        let issues = &mut report.issues;

        for (i, leaf) in self.leaves().iter().enumerate() {
            if leaf.record() != Some(i) {
                issues.push(Issue::LeafOutOfOrder {
                    node: leaf.id,
                    record: leaf.record(),
                });
            }
            if leaf.height != 0.0 {
                issues.push(Issue::LeafHeight {
                    node: leaf.id,
                    height: leaf.height,
                });
            }
        }

        let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
        for node in self.iter().skip(self.n_leaves()) {
            if node.is_leaf() {
                issues.push(Issue::LeafInMergeRegion { node: node.id });
                continue;
            }
            if !node.height.is_finite() {
                issues.push(Issue::NonFiniteHeight { node: node.id });
            }

            let mut expected_members = 0;
            for &child_id in node.children() {
                let Some(child) = self.node(child_id).filter(|_| child_id < node.id) else {
                    issues.push(Issue::ChildAfterParent {
                        node: node.id,
                        child: child_id,
                    });
                    continue;
                };
                if let Some(first) = parents.insert(child_id, node.id) {
                    issues.push(Issue::MultipleParents {
                        node: child_id,
                        first,
                        second: node.id,
                    });
                }
                if child.height > node.height + HEIGHT_TOLERANCE {
                    issues.push(Issue::HeightInversion {
                        node: node.id,
                        child: child_id,
                    });
                }
                expected_members += child.members().len();
            }
            if node.members().len() != expected_members {
                issues.push(Issue::Membership { node: node.id });
            }
        }

        if let Some((root, root_node)) = self.root().zip(self.iter().last()) {
            report.root_height = root_node.height;
            if root_node.members().len() != self.n_leaves() {
                issues.push(Issue::PartialRoot {
                    covered: root_node.members().len(),
                    n_records: self.n_leaves(),
                });
            }
            issues.extend(
                self.iter()
                    .filter(|n| n.id != root && !parents.contains_key(&n.id))
                    .map(|n| Issue::Orphan { node: n.id }),
            );
            report.max_depth = self.depth_from(root);
        }

        report
    }
}

impl Dendrogram {
    fn depth_from(&self, root: usize) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.node(id) {
                stack.extend(
                    node.children()
                        .iter()
                        .filter(|&&c| c < id)
                        .map(|&c| (c, depth + 1)),
                );
            }
        }
        max_depth
    }
}
