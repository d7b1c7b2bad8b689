//! 2048 on a 4x4 board.
//!
//! Single-player. Sliding compresses every line toward one edge and merges
//! equal neighbours once; any move that changes the board spawns a 2 or a 4.
//! Reaching 2048 is recorded but play continues until the board is stuck.

mod game;

pub use game::{is_game_over, shift, slide_line, Board, Direction, Game2048, Game2048State, GOAL, MAX_TILE, SIZE};
