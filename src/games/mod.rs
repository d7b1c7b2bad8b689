//! Game implementations.
//!
//! Each game provides a state type, an engine implementing `Rules`, and
//! (except 2048) a built-in opponent implementing `MovePolicy`.

pub mod checkers;
pub mod erudite;
pub mod g2048;
pub mod tictactoe;
