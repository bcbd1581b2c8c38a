//! Concrete games implementing `TwoPlayerGame`.
//!
//! - `tictactoe`: 3x3 tic-tac-toe, the reference game for the search engine

pub mod tictactoe;
