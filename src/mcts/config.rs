//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MCTSConfig {
    /// UCB exploration constant (default: 1.0).
    /// Higher values favor exploration over exploitation. Zero is accepted
    /// but turns the search into pure exploitation.
    pub exploration_constant: f64,

    /// Random seed for the engine RNG.
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.0,
            seed: 42,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the parameters, rejecting values the search cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = self.exploration_constant;
        if !c.is_finite() {
            return Err(ConfigError::NonFiniteExploration(c));
        }
        if c < 0.0 {
            return Err(ConfigError::NegativeExploration(c));
        }
        Ok(())
    }

    /// True when the exploration bonus is switched off entirely.
    #[must_use]
    pub fn is_pure_exploitation(&self) -> bool {
        self.exploration_constant == 0.0
    }
}
