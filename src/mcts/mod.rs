//! Monte Carlo Tree Search for two-player zero-sum games.
//!
//! ## Overview
//!
//! UCT search with random rollouts:
//!
//! - **Arena tree**: nodes live in a flat vector; parents are indices
//! - **Minimizing UCB**: values are kept in player 0's frame and negated at
//!   player 1 nodes, so every choice takes the lowest score
//! - **Random rollouts**: leaves are valued by the mean of several uniform
//!   random playouts
//! - **Configurable Policies**: selection and simulation are traits
//! - **Serializable**: trees and config can be saved/loaded
//!
//! ## Usage
//!
//! ```rust
//! use two_player_mcts::games::tictactoe::TicTacToe;
//! use two_player_mcts::mcts::{MCTSConfig, MCTSSearch};
//! use two_player_mcts::rules::TwoPlayerGame;
//!
//! let game = TicTacToe::new();
//! let (board, to_move) = game.initial_state();
//!
//! let mut search = MCTSSearch::new(game, MCTSConfig::default()).unwrap();
//!
//! // 200 iterations, 5 random playouts per new leaf
//! let action = search.pick_best_action(&board, to_move, 200, 5).unwrap();
//! assert!(action < 9);
//!
//! // Or keep the whole tree for inspection
//! let tree = search.search(&board, to_move, 200, 5).unwrap();
//! assert_eq!(tree.root_node().visits(), 200);
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! use two_player_mcts::mcts::{MCTSSearch, MCTSConfig};
//!
//! let search = MCTSSearch::new(game, config)?
//!     .with_simulation(MyHeuristicRollout);
//! ```

pub mod config;
pub mod error;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use error::{ConfigError, SearchError};
pub use node::{ChildStats, Edge, MCTSNode, NodeId};
pub use policy::{RandomRollout, SelectionPolicy, SimulationPolicy, UCB1};
pub use search::{GameTree, MCTSSearch};
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
