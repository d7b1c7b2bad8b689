//! Opponent policy seam.
//!
//! Every built-in opponent implements `MovePolicy` for its game's `Rules`:
//!
//! | Game        | Policy          | Strategy                                  |
//! |-------------|-----------------|-------------------------------------------|
//! | Tic-tac-toe | `TicTacToeAi`   | random / win-block-centre / full minimax  |
//! | Checkers    | `CheckersAi`    | captures, then advances, then anything    |
//! | Erudite     | `EruditeAi`     | greedy highest-scoring placement          |
//!
//! 2048 is single-player and has no opponent.

pub mod policy;

pub use policy::{MovePolicy, UniformRandom};
