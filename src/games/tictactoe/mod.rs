//! Tic-tac-toe on a 3x3 board.
//!
//! - Player 0 places `1` (X), player 1 places `2` (O)
//! - Actions are cell indices `row * 3 + col`, 0 to 8
//! - Completing a row, column or diagonal wins (+1 for player 0, -1 for
//!   player 1); a full board without a line is a draw (0)

mod game;

pub use game::{Board, TicTacToe, TicTacToeError};
