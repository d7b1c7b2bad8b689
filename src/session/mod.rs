//! Turn orchestration and persistence.
//!
//! ## Overview
//!
//! - `Session`: applies a player move, then lets the opponent answer for as
//!   long as it holds the turn (whole capture chains included)
//! - `Pacer`: optional pause before each AI move
//! - `GameDocument`: the persisted form of any one game, JSON or binary
//! - `play_document`: one turn against a stored game of any kind
//!
//! ## Usage
//!
//! ```rust
//! use board_engines::core::{Coord, Move, SessionConfig, TurnOutcome};
//! use board_engines::games::tictactoe::{TicTacToe, TicTacToeAi};
//! use board_engines::session::Session;
//!
//! let mut session = Session::new(TicTacToe, SessionConfig::default())
//!     .with_opponent(TicTacToeAi::default());
//! let state = session.new_game();
//!
//! let report = session.play_turn(&state, &Move::place(Coord::new(1, 1))).unwrap();
//! assert_eq!(report.outcome, TurnOutcome::Continue);
//! assert_eq!(report.ai_moves.len(), 1);
//! ```

pub mod document;
pub mod pacer;
pub mod stats;
pub mod turn;

pub use document::{play_document, DocumentTurn, GameDocument, GameKind, MoveRequest};
pub use pacer::{NoPause, Pacer, SleepPacer};
pub use stats::TurnStats;
pub use turn::{Session, TurnReport};
