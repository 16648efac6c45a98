//! Dendrogram node.

use core::fmt;

/// Index of a node inside its [`Dendrogram`](super::Dendrogram) arena.
pub type NodeId = usize;

/// A node in a dendrogram.
///
/// Leaves hold one record; merge nodes hold exactly two children that were
/// created earlier in the same arena. Nodes are never modified after they are
/// pushed: the height is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Position in the arena.
    pub id: NodeId,
    /// Merge height (0.0 for leaves).
    pub height: f64,
    /// Leaf payload or child references.
    pub content: NodeContent,
    members: Vec<usize>,
}

/// Content of a dendrogram node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    /// A single record and its numeric-active values.
    Leaf {
        /// Record index in the input.
        record: usize,
        /// Numeric-active values, for display.
        point: Vec<f64>,
    },
    /// Two clusters joined at `height`.
    Merge {
        /// The two merged clusters, in enumeration order.
        children: [NodeId; 2],
    },
}

impl Node {
    pub(crate) fn leaf(id: NodeId, record: usize, point: Vec<f64>) -> Self {
        Self {
            id,
            height: 0.0,
            content: NodeContent::Leaf { record, point },
            members: vec![record],
        }
    }

    pub(crate) fn merge(id: NodeId, left: &Node, right: &Node, height: f64) -> Self {
        let mut members = Vec::with_capacity(left.members.len() + right.members.len());
        members.extend_from_slice(&left.members);
        members.extend_from_slice(&right.members);
        Self {
            id,
            height,
            content: NodeContent::Merge {
                children: [left.id, right.id],
            },
            members,
        }
    }

    /// Check if this is a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, NodeContent::Leaf { .. })
    }

    /// Merge height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Record indices under this node, left subtree first.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Child ids (empty for leaves).
    pub fn children(&self) -> &[NodeId] {
        match &self.content {
            NodeContent::Leaf { .. } => &[],
            NodeContent::Merge { children } => children,
        }
    }

    /// Record index if this is a leaf.
    pub fn record(&self) -> Option<usize> {
        match self.content {
            NodeContent::Leaf { record, .. } => Some(record),
            NodeContent::Merge { .. } => None,
        }
    }

    /// Numeric-active values if this is a leaf.
    pub fn point(&self) -> Option<&[f64]> {
        match &self.content {
            NodeContent::Leaf { point, .. } => Some(point),
            NodeContent::Merge { .. } => None,
        }
    }

    /// Leaf values joined by `", "`; empty for merge nodes.
    pub fn point_to_string(&self) -> String {
        self.point()
            .map(|p| {
                p.iter()
                    .map(|x| x.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            NodeContent::Leaf { record, .. } => {
                write!(f, "Leaf[{}] record {}: {}", self.id, record, self.point_to_string())
            }
            NodeContent::Merge { children } => write!(
                f,
                "Node[{}] h={:.3}: {} + {}",
                self.id, self.height, children[0], children[1]
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_accessors() {
        let leaf = Node::leaf(0, 7, vec![1.5, 2.0]);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.height(), 0.0);
        assert_eq!(leaf.members(), &[7]);
        assert!(leaf.children().is_empty());
        assert_eq!(leaf.record(), Some(7));
        assert_eq!(leaf.point_to_string(), "1.5, 2");
    }

    #[test]
    fn test_merge_flattens_members() {
        let a = Node::leaf(0, 0, vec![0.0]);
        let b = Node::leaf(1, 1, vec![1.0]);
        let ab = Node::merge(2, &a, &b, 1.0);
        let c = Node::leaf(3, 2, vec![5.0]);
        let abc = Node::merge(4, &ab, &c, 5.0);

        assert!(!abc.is_leaf());
        assert_eq!(abc.children(), &[2, 3]);
        assert_eq!(abc.members(), &[0, 1, 2]);
        assert_eq!(abc.point(), None);
        assert_eq!(abc.point_to_string(), "");
        assert_eq!(abc.to_string(), "Node[4] h=5.000: 2 + 3");
    }
}
