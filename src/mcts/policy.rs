//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into (UCB1)
//! - `SimulationPolicy`: How to evaluate a leaf by playing it out (random)
//!
//! ## Value frame
//!
//! Every accumulated value is stored in a single player-0-relative frame and
//! negated at nodes where player 1 is to move. Under that convention a parent
//! always prefers the child with the *lowest* mean, whichever player moves at
//! the parent, so both the UCB rule and the final move choice minimize.

use crate::core::{GameRng, PlayerId};
use crate::rules::TwoPlayerGame;

use super::error::SearchError;
use super::node::ChildStats;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select a child index given the parent's visit count and the children's
    /// statistics.
    ///
    /// # Panics
    ///
    /// Implementations panic when `parent_visits == 0` or `children` is empty:
    /// descending through an unevaluated or unexpanded node is a bug in the
    /// caller.
    fn select(
        &self,
        parent_visits: u32,
        children: &[ChildStats],
        exploration_constant: f64,
        rng: &mut GameRng,
    ) -> usize;
}

/// UCB1 (Upper Confidence Bound) selection under the minimizing convention.
///
/// Formula: Q(a) - c * sqrt(ln(N) / n(a)), lowest score wins.
/// Unvisited children score `-inf`. Ties are broken uniformly at random.
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl UCB1 {
    /// Score every child; lower is more attractive.
    #[must_use]
    pub fn scores(parent_visits: u32, children: &[ChildStats], exploration_constant: f64) -> Vec<f64> {
        let ln_parent = (parent_visits as f64).ln();

        children
            .iter()
            .map(|child| match child.mean_value() {
                None => f64::NEG_INFINITY,
                Some(q) => {
                    q - exploration_constant * (ln_parent / child.visits as f64).sqrt()
                }
            })
            .collect()
    }
}

impl SelectionPolicy for UCB1 {
    fn select(
        &self,
        parent_visits: u32,
        children: &[ChildStats],
        exploration_constant: f64,
        rng: &mut GameRng,
    ) -> usize {
        assert!(parent_visits > 0, "Parent node visits must be > 0 for selection");
        assert!(!children.is_empty(), "Selection requires an expanded node");

        let scores = Self::scores(parent_visits, children, exploration_constant);
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);

        let best: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == min)
            .map(|(i, _)| i)
            .collect();

        match best.as_slice() {
            [only] => *only,
            // NaN scores cannot be ordered; fall back to a uniform pick.
            [] => rng.pick_index(children.len()),
            many => many[rng.pick_index(many.len())],
        }
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy<G: TwoPlayerGame>: Send + Sync {
    /// Play one game out from `state` with `to_move` to act, returning the
    /// final transition's player-0-relative reward.
    fn simulate(
        &self,
        game: &G,
        state: &G::State,
        to_move: PlayerId,
        rng: &mut GameRng,
    ) -> Result<f64, SearchError>;
}

/// Random simulation policy.
///
/// Plays uniformly random legal actions until the game signals termination.
#[derive(Clone, Debug, Default)]
pub struct RandomRollout;

impl<G: TwoPlayerGame> SimulationPolicy<G> for RandomRollout {
    fn simulate(
        &self,
        game: &G,
        state: &G::State,
        to_move: PlayerId,
        rng: &mut GameRng,
    ) -> Result<f64, SearchError> {
        let mut player = to_move;
        let mut state = state.clone();

        loop {
            let actions = game.legal_actions(player, &state);
            let action = *rng
                .choose(&actions)
                .ok_or(SearchError::NoLegalActions { player })?;

            let transition = game
                .apply_action(player, action, &state)
                .map_err(SearchError::game)?;

            if transition.done {
                return Ok(transition.reward);
            }

            state = transition.state;
            player = player.opponent();
        }
    }
}
