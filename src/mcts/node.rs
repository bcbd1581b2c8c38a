//! MCTS node and edge structures.
//!
//! Uses arena-based allocation with index references (NodeId) for efficiency
//! and serializability. A node's parent is a plain index into the same arena;
//! ownership flows only from the tree to its nodes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Edge from a parent node to the child reached by `action`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge<A> {
    /// The action this edge represents.
    pub action: A,

    /// Child node produced by the action.
    pub child: NodeId,
}

/// Visit statistics of one child, as seen by a selection policy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChildStats {
    pub visits: u32,
    pub accumulated_value: f64,
}

impl ChildStats {
    /// Mean backpropagated value, `None` if never visited.
    #[must_use]
    pub fn mean_value(&self) -> Option<f64> {
        (self.visits > 0).then(|| self.accumulated_value / self.visits as f64)
    }
}

/// A node in the MCTS tree: one reachable (state, player to move) pair.
///
/// The state, the player to move and the terminal flag are fixed at creation.
/// Only backpropagation touches the statistics, through [`MCTSNode::record`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSNode<S, A> {
    state: S,
    to_move: PlayerId,
    parent: NodeId,
    depth: u16,
    is_terminal: bool,
    terminal_reward: f64,

    visits: u32,
    accumulated_value: f64,

    /// Outgoing edges in legal-action order.
    /// SmallVec optimizes for typical branching factor <= 9.
    edges: SmallVec<[Edge<A>; 9]>,
}

impl<S, A> MCTSNode<S, A> {
    /// Create a child node.
    ///
    /// `terminal_reward` is only kept when `is_terminal` is set.
    pub fn new(
        state: S,
        to_move: PlayerId,
        parent: NodeId,
        depth: u16,
        is_terminal: bool,
        terminal_reward: f64,
    ) -> Self {
        Self {
            state,
            to_move,
            parent,
            depth,
            is_terminal,
            terminal_reward: if is_terminal { terminal_reward } else { 0.0 },
            visits: 0,
            accumulated_value: 0.0,
            edges: SmallVec::new(),
        }
    }

    /// Create a root node.
    pub fn root(state: S, to_move: PlayerId) -> Self {
        Self::new(state, to_move, NodeId::NONE, 0, false, 0.0)
    }

    /// Game state at this node.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Player to move at this node.
    #[inline]
    pub fn to_move(&self) -> PlayerId {
        self.to_move
    }

    /// Parent node (NONE for root).
    #[inline]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Depth in tree (root = 0).
    #[inline]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Was this node produced by a game-ending transition?
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Reward of the transition that ended the game (0.0 when not terminal).
    #[inline]
    pub fn terminal_reward(&self) -> f64 {
        self.terminal_reward
    }

    /// Total visits to this node.
    #[inline]
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Sum of backpropagated values, negated at player 1 nodes.
    #[inline]
    pub fn accumulated_value(&self) -> f64 {
        self.accumulated_value
    }

    /// Mean backpropagated value, `None` if never visited.
    #[must_use]
    pub fn mean_value(&self) -> Option<f64> {
        self.child_stats().mean_value()
    }

    /// Statistics in the shape selection policies consume.
    #[must_use]
    pub fn child_stats(&self) -> ChildStats {
        ChildStats {
            visits: self.visits,
            accumulated_value: self.accumulated_value,
        }
    }

    /// Outgoing edges.
    #[inline]
    pub fn edges(&self) -> &[Edge<A>] {
        &self.edges
    }

    /// Has expansion run on this node?
    #[inline]
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.edges.is_empty()
    }

    /// Attach the children produced by expansion.
    pub(crate) fn set_edges(&mut self, edges: SmallVec<[Edge<A>; 9]>) {
        debug_assert!(self.edges.is_empty(), "node expanded twice");
        debug_assert!(!self.is_terminal, "terminal node expanded");
        self.edges = edges;
    }

    /// Record one backpropagated evaluation.
    ///
    /// `value` is player-0-relative; it is stored negated at player 1 nodes.
    pub(crate) fn record(&mut self, value: f64) {
        self.visits += 1;
        self.accumulated_value += self.to_move.sign() * value;
    }
}
