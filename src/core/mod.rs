//! Core engine types: players and randomness.
//!
//! This module holds the game-agnostic building blocks shared by the rules
//! trait, the search engine and concrete games.

pub mod player;
pub mod rng;

pub use player::PlayerId;
pub use rng::GameRng;
