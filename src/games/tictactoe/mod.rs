//! Tic-tac-toe on a 3x3 board.
//!
//! The player plays X and moves first; the opponent plays O. Three equal
//! marks on any of the 8 lines win; a full board without a line is a draw.

mod ai;
mod game;

pub use ai::TicTacToeAi;
pub use game::{line_winner, Board, Mark, Square, TicTacToe, TicTacToeState, LINES, SIZE};
