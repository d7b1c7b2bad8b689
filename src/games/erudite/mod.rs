//! Erudite: a Scrabble-like word game on a 15x15 board.
//!
//! - `tiles`: tile set, letter values, premium layout
//! - `words`: optional dictionary
//! - `game`: state, placement validation, scoring
//! - `ai`: greedy opponent

mod ai;
mod game;
mod tiles;
mod words;

pub use ai::EruditeAi;
pub use game::{Board, Bonuses, Erudite, EruditeMove, EruditeState, Placements, Rack, ScoredPlay, PASS_LIMIT};
pub use tiles::{
    full_set, letter_value, standard_layout, Bonus, Placed, Placement, Tile, CENTER, RACK_SIZE, SIZE,
    TOTAL_TILES,
};
pub use words::WordList;
