//! Errors raised while configuring or running a search.

use thiserror::Error;

use crate::core::PlayerId;

/// Invalid engine configuration, rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("exploration constant must be >= 0, got {0}")]
    NegativeExploration(f64),

    #[error("exploration constant must be finite, got {0}")]
    NonFiniteExploration(f64),
}

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The game reported no legal actions for a state it did not mark terminal.
    #[error("No legal actions available for {player}")]
    NoLegalActions { player: PlayerId },

    /// The game rejected a transition.
    #[error("Game error: {0}")]
    Game(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Rollout count must be at least 1")]
    ZeroRollouts,

    #[error("Iteration budget must be at least 1 to pick an action")]
    ZeroIterations,
}

impl SearchError {
    /// Wrap an error returned by the game.
    pub fn game<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        Self::Game(Box::new(err))
    }
}
