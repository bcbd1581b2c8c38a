//! # two-player-mcts
//!
//! Monte Carlo Tree Search (UCT) for two-player, zero-sum, turn-based games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The engine only sees the `TwoPlayerGame` trait:
//!    legal actions and a transition function. States and actions are opaque.
//!
//! 2. **One Value Frame**: Rewards are always player-0-relative. Node values
//!    are negated where player 1 moves, so selection minimizes everywhere.
//!
//! 3. **Deterministic**: All randomness flows through a seeded `GameRng`.
//!    Same seed and inputs, same tree.
//!
//! ## Modules
//!
//! - `core`: Player IDs and RNG
//! - `rules`: `TwoPlayerGame` trait for game implementations
//! - `mcts`: Monte Carlo Tree Search
//! - `games`: Reference games (tic-tac-toe)

pub mod core;
pub mod rules;
pub mod mcts;
pub mod games;

// Re-export commonly used types
pub use crate::core::{GameRng, PlayerId};

pub use crate::rules::{Transition, TwoPlayerGame};

pub use crate::mcts::{
    MCTSConfig, MCTSSearch, MCTSTree, MCTSNode, NodeId, Edge, ChildStats,
    ConfigError, SearchError, SearchStats, TreeStats, GameTree,
    SelectionPolicy, SimulationPolicy, UCB1, RandomRollout,
};

pub use crate::games::tictactoe::{Board, TicTacToe, TicTacToeError};
