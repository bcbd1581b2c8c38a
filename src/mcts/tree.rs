//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<MCTSNode>` with index-based references for efficiency,
//! cache-friendliness, and serializability.

use serde::{Deserialize, Serialize};

use super::node::{ChildStats, Edge, MCTSNode, NodeId};
use crate::core::PlayerId;

/// Arena-based MCTS tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
/// Each node's parent is an index, so the tree is walked top-down for
/// selection and bottom-up for backpropagation without reference counting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSTree<S, A> {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode<S, A>>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl<S, A> MCTSTree<S, A> {
    /// Create a new tree with a root node.
    pub fn new(root_state: S, to_move: PlayerId) -> Self {
        Self::with_capacity(root_state, to_move, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(root_state: S, to_move: PlayerId, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MCTSNode::root(root_state, to_move));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode<S, A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<S, A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub(crate) fn alloc(&mut self, node: MCTSNode<S, A>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true: the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode<S, A> {
        self.get(self.root)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<S, A>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Iterate over (action, child) pairs of a node, in expansion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (&A, &MCTSNode<S, A>)> {
        self.get(id)
            .edges()
            .iter()
            .map(move |edge| (&edge.action, self.get(edge.child)))
    }

    /// Visit statistics of a node's children, in expansion order.
    #[must_use]
    pub fn child_stats(&self, id: NodeId) -> Vec<ChildStats> {
        self.get(id)
            .edges()
            .iter()
            .map(|edge| self.get(edge.child).child_stats())
            .collect()
    }

    /// Edge of `id` at position `index`.
    #[inline]
    pub fn edge(&self, id: NodeId, index: usize) -> &Edge<A> {
        &self.get(id).edges()[index]
    }

    /// Root action whose child has the lowest mean value.
    ///
    /// Unvisited children are skipped; ties go to the earliest action.
    /// `None` until at least one root child has been visited.
    #[must_use]
    pub fn best_action(&self) -> Option<&A> {
        let mut best: Option<(&A, f64)> = None;
        for (action, child) in self.children(self.root) {
            let Some(mean) = child.mean_value() else {
                continue;
            };
            if best.map_or(true, |(_, best_mean)| mean < best_mean) {
                best = Some((action, mean));
            }
        }
        best.map(|(action, _)| action)
    }

    /// (action, visit count) pairs of the root's children.
    pub fn action_visits(&self) -> Vec<(&A, u32)> {
        self.children(self.root)
            .map(|(action, child)| (action, child.visits()))
            .collect()
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth()).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal()).count();
        let expanded_count = self.nodes.iter().filter(|n| n.is_expanded()).count();
        let total_edges: usize = self.nodes.iter().map(|n| n.edges().len()).sum();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            expanded_count,
            total_edges,
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Number of nodes that have been expanded.
    pub expanded_count: usize,

    /// Total number of edges (actions).
    pub total_edges: usize,
}

impl TreeStats {
    /// Average number of children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            self.total_edges as f64 / self.expanded_count as f64
        }
    }
}
