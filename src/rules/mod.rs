//! Game trait for rule implementations.
//!
//! Games implement `TwoPlayerGame` to define:
//! - Legal actions for each game state
//! - How actions produce successor states
//! - Terminal conditions and rewards
//!
//! The search engine calls into `TwoPlayerGame` but never interprets
//! game-specific concepts directly.

pub mod game;

pub use game::{Transition, TwoPlayerGame};
