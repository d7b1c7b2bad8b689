//! Checkers on an 8x8 board.
//!
//! Pieces live on dark squares (odd `row + col`). The player starts on rows
//! 5-7 and moves up the board; the opponent starts on rows 0-2 and moves
//! down. Captures are mandatory and chain while the same piece can keep
//! jumping; a man reaching the far row is crowned as part of that move.

mod ai;
mod game;

pub use ai::CheckersAi;
pub use game::{crowning_row, forward, Board, Checkers, CheckersState, Rank, Square, SIZE};
