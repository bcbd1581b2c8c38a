//! Game trait consumed by the search engine.
//!
//! Games implement `TwoPlayerGame` to define their rules:
//! - What actions are legal for the player to move
//! - How an action transforms a state
//! - When the game ends and who it favours

use crate::core::PlayerId;

/// Outcome of applying one action to a state.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<S> {
    /// The state after the action.
    pub state: S,

    /// Reward from player 0's perspective (positive favours player 0).
    pub reward: f64,

    /// Whether the game ended with this transition.
    pub done: bool,
}

impl<S> Transition<S> {
    /// A transition that does not end the game.
    pub fn ongoing(state: S) -> Self {
        Self {
            state,
            reward: 0.0,
            done: false,
        }
    }

    /// A transition that ends the game with the given player-0-relative reward.
    pub fn finished(state: S, reward: f64) -> Self {
        Self {
            state,
            reward,
            done: true,
        }
    }
}

/// Two-player, zero-sum, turn-based game.
///
/// The engine calls these methods during expansion and rollouts and never
/// looks inside `State` or `Action`.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Must be a pure function of its arguments. Returning an
///   empty list for a state that is not terminal is a contract violation.
/// - `apply_action`: Must not mutate the input state and must return an error
///   for actions that are not currently legal.
pub trait TwoPlayerGame {
    /// Game state. Cloned only by the game itself when producing successors.
    type State: Clone;

    /// Action identifier. Opaque to the engine; need not be dense.
    type Action: Copy + PartialEq + std::fmt::Debug;

    /// Error returned for illegal transitions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Starting state and the player who moves first.
    fn initial_state(&self) -> (Self::State, PlayerId);

    /// Legal actions for `player` in `state`, in a stable order.
    fn legal_actions(&self, player: PlayerId, state: &Self::State) -> Vec<Self::Action>;

    /// Apply `action` for `player`, producing the successor state.
    fn apply_action(
        &self,
        player: PlayerId,
        action: Self::Action,
        state: &Self::State,
    ) -> Result<Transition<Self::State>, Self::Error>;
}
