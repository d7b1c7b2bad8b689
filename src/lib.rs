//! # board-engines
//!
//! Rules engines and built-in opponents for four turn-based board games:
//! tic-tac-toe, checkers, 2048, and Erudite (a Scrabble-like word game).
//!
//! ## Design Principles
//!
//! 1. **States Are Values**: every transition takes a state by reference and
//!    returns a new one. A rejected move leaves the caller's state as it was.
//!
//! 2. **Errors, Not Panics**: illegal moves come back as `MoveError`, broken
//!    persisted documents as `StateError`. Callers start a fresh game on the
//!    latter instead of repairing it.
//!
//! 3. **Seeded Randomness**: the only randomness is a `GameRng` handed in by
//!    the caller, so a game replays exactly from its seed.
//!
//! ## Modules
//!
//! - `core`: Coordinates, grids, sides, moves, errors, RNG, configuration
//! - `rules`: `Rules` trait implemented by every engine
//! - `ai`: `MovePolicy` trait for opponents
//! - `games`: The four games and their opponents
//! - `session`: Turn loop, pacing, and persisted documents

pub mod ai;
pub mod core;
pub mod games;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    AiConfig, Cell, Coord, Difficulty, GameRng, GameRngState, Grid, Move, MoveError, Outcome,
    SessionConfig, Side, StateError, TurnOutcome,
};

pub use crate::rules::Rules;

pub use crate::ai::{MovePolicy, UniformRandom};

pub use crate::games::checkers::{Checkers, CheckersAi, CheckersState};
pub use crate::games::erudite::{Erudite, EruditeAi, EruditeMove, EruditeState, WordList};
pub use crate::games::g2048::{Direction, Game2048, Game2048State};
pub use crate::games::tictactoe::{TicTacToe, TicTacToeAi, TicTacToeState};

pub use crate::session::{
    play_document, GameDocument, GameKind, MoveRequest, Pacer, Session, TurnReport, TurnStats,
};
