//! Dendrogram produced by agglomerative clustering.
//!
//! Nodes live in an append-only arena. Leaves occupy ids `0..n_leaves` in
//! record order; every merge appends one node whose two children already
//! exist, so a child id is always smaller than its parent's id and the last
//! node pushed is the root.

use super::node::{Node, NodeContent, NodeId};
use crate::error::{Error, Result};

/// A dendrogram representing hierarchical cluster merges.
#[derive(Debug, Clone, Default)]
pub struct Dendrogram {
    nodes: Vec<Node>,
    n_leaves: usize,
}

impl Dendrogram {
    /// Create a dendrogram with one leaf per point.
    pub fn from_leaves(points: &[Vec<f64>]) -> Self {
        let mut nodes = Vec::with_capacity((2 * points.len()).saturating_sub(1));
        for (record, point) in points.iter().enumerate() {
            nodes.push(Node::leaf(record, record, point.clone()));
        }
        Self {
            nodes,
            n_leaves: points.len(),
        }
    }

    /// Append a merge of two existing nodes and return the new node's id.
    pub(crate) fn add_merge(&mut self, left: NodeId, right: NodeId, height: f64) -> NodeId {
        let id = self.nodes.len();
        let node = Node::merge(id, &self.nodes[left], &self.nodes[right], height);
        self.nodes.push(node);
        id
    }

    /// Root node id, or `None` for an empty dendrogram.
    ///
    /// Only meaningful once clustering has finished; before that the last
    /// node pushed is merely the most recent merge.
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.len().checked_sub(1)
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of original items.
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.nodes.len() - self.n_leaves
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when built from no records.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Leaf nodes in record order.
    pub fn leaves(&self) -> &[Node] {
        &self.nodes[..self.n_leaves]
    }

    /// Merge heights in creation order (for visualization).
    pub fn heights(&self) -> Vec<f64> {
        self.nodes[self.n_leaves..].iter().map(|n| n.height).collect()
    }

    /// Cut the whole tree at `threshold`; see [`Dendrogram::cut_from`].
    pub fn cut(&self, threshold: f64) -> Vec<NodeId> {
        match self.root() {
            Some(root) => self.cut_from(root, threshold),
            None => Vec::new(),
        }
    }

    /// Cut the subtree rooted at `id` with a horizontal line at `threshold`.
    ///
    /// A node whose height is `<= threshold` is kept whole; otherwise its
    /// children are cut in turn. Leaves are always kept, so a threshold below
    /// zero yields every leaf. Output is in left-to-right tree order; an id
    /// outside the arena yields nothing.
    pub fn cut_from(&self, id: NodeId, threshold: f64) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            match node.content {
                NodeContent::Merge { children } if node.height > threshold || threshold.is_nan() => {
                    stack.push(children[1]);
                    stack.push(children[0]);
                }
                _ => out.push(id),
            }
        }
        out
    }

    /// Get cluster assignments at a given distance threshold.
    ///
    /// See [`Dendrogram::labels_for`] for how labels are numbered.
    pub fn labels_at(&self, threshold: f64) -> Vec<usize> {
        self.labels_for(&self.cut(threshold))
    }

    /// Undo the last `k - 1` merges, producing exactly `k` clusters.
    pub fn cut_to_k(&self, k: usize) -> Result<Vec<NodeId>> {
        if k == 0 || k > self.n_leaves {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: self.n_leaves,
            });
        }
        let Some(root) = self.root() else {
            return Ok(Vec::new());
        };

        // Merges are appended in non-decreasing height order, so the
        // highest id is always the next one to split.
        let mut clusters = vec![root];
        while clusters.len() < k {
            let pos = (0..clusters.len())
                .max_by_key(|&i| clusters[i])
                .unwrap_or_default();
            let children = self.nodes[clusters[pos]].children();
            if children.is_empty() {
                break;
            }
            clusters[pos] = children[0];
            clusters.insert(pos + 1, children[1]);
        }
        Ok(clusters)
    }

    /// Flat labels, one per record, for a set of disjoint cluster nodes.
    ///
    /// Labels are numbered by first appearance in record order, so record 0
    /// always has label 0. Ids outside the arena are ignored; records no
    /// cluster covers share one extra label.
    pub fn labels_for(&self, clusters: &[NodeId]) -> Vec<usize> {
        let uncovered = clusters.len();
        let mut owner = vec![uncovered; self.n_leaves];
        for (pos, &id) in clusters.iter().enumerate() {
            let Some(node) = self.node(id) else {
                continue;
            };
            for &record in node.members() {
                owner[record] = pos;
            }
        }

        let mut relabel = vec![None; uncovered + 1];
        let mut next = 0;
        owner
            .into_iter()
            .map(|pos| {
                *relabel[pos].get_or_insert_with(|| {
                    next += 1;
                    next - 1
                })
            })
            .collect()
    }
}
