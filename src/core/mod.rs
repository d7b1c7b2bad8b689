//! Core engine types: coordinates, boards, sides, moves, errors, RNG, configuration.
//!
//! These are shared by every game. Game-specific types live in `games`.

pub mod action;
pub mod config;
pub mod error;
pub mod grid;
pub mod player;
pub mod rng;

pub use action::Move;
pub use config::{AiConfig, Difficulty, SessionConfig};
pub use error::{MoveError, StateError};
pub use grid::{Cell, Coord, Grid};
pub use player::{Outcome, Side, TurnOutcome};
pub use rng::{GameRng, GameRngState};
