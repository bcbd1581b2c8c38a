//! Tic-tac-toe rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::PlayerId;
use crate::rules::{Transition, TwoPlayerGame};

/// Winning lines (rows, columns, diagonals).
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Empty cell marker.
const EMPTY: u8 = 0;

/// Rejected tic-tac-toe move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicTacToeError {
    #[error("Invalid action index: {0}. Must be between 0 and 8.")]
    InvalidActionIndex(usize),

    #[error("Invalid action: Cell ({row}, {col}) is already occupied.")]
    CellOccupied { row: usize, col: usize },
}

/// 3x3 board, row-major: 0 = empty, 1 = X (player 0), 2 = O (player 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [u8; 9],
}

impl Board {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from three rows of markers.
    pub fn from_rows(rows: [[u8; 3]; 3]) -> Self {
        let mut cells = [EMPTY; 9];
        for (r, row) in rows.iter().enumerate() {
            cells[r * 3..r * 3 + 3].copy_from_slice(row);
        }
        Self { cells }
    }

    /// Marker at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..3`.
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        assert!(row < 3 && col < 3, "cell ({}, {}) is off the board", row, col);
        self.cells[row * 3 + col]
    }

    /// The board as three rows.
    pub fn rows(&self) -> [[u8; 3]; 3] {
        let c = &self.cells;
        [[c[0], c[1], c[2]], [c[3], c[4], c[5]], [c[6], c[7], c[8]]]
    }

    /// Marker a player places.
    pub fn marker(player: PlayerId) -> u8 {
        player.index() as u8 + 1
    }

    /// Indices of empty cells, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..9).filter(|&i| self.cells[i] == EMPTY).collect()
    }

    fn has_line(&self, marker: u8) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == marker))
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != EMPTY)
    }
}

/// Tic-tac-toe rules. Stateless; the board is the game state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    pub fn new() -> Self {
        Self
    }
}

impl TwoPlayerGame for TicTacToe {
    type State = Board;
    type Action = usize;
    type Error = TicTacToeError;

    fn initial_state(&self) -> (Board, PlayerId) {
        (Board::new(), PlayerId::FIRST)
    }

    fn legal_actions(&self, _player: PlayerId, state: &Board) -> Vec<usize> {
        state.empty_cells()
    }

    fn apply_action(
        &self,
        player: PlayerId,
        action: usize,
        state: &Board,
    ) -> Result<Transition<Board>, TicTacToeError> {
        if action > 8 {
            return Err(TicTacToeError::InvalidActionIndex(action));
        }
        if state.cells[action] != EMPTY {
            return Err(TicTacToeError::CellOccupied {
                row: action / 3,
                col: action % 3,
            });
        }

        let marker = Board::marker(player);
        let mut next = *state;
        next.cells[action] = marker;

        if next.has_line(marker) {
            return Ok(Transition::finished(next, player.sign()));
        }
        if next.is_full() {
            return Ok(Transition::finished(next, 0.0));
        }
        Ok(Transition::ongoing(next))
    }
}
