//! Persisted game documents.
//!
//! One document holds exactly one game's state, tagged with the game it
//! belongs to:
//!
//! ```json
//! { "game": "tic_tac_toe", "state": { "board": [...], "current_player": "Player", "winner": null } }
//! ```
//!
//! Decoding is strict: unknown or missing fields are errors, and every
//! decoded state is validated. A document that fails either check is not
//! repaired; `load_or_fresh` replaces it with a new game.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::turn::Session;
use crate::core::{GameRng, Move, MoveError, SessionConfig, StateError, TurnOutcome};
use crate::games::checkers::{Checkers, CheckersAi, CheckersState};
use crate::games::erudite::{Erudite, EruditeAi, EruditeMove, EruditeState};
use crate::games::g2048::{Direction, Game2048, Game2048State};
use crate::games::tictactoe::{TicTacToe, TicTacToeAi, TicTacToeState};
use crate::rules::Rules;

/// Which game a document or request is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    TicTacToe,
    Checkers,
    #[serde(rename = "2048")]
    Game2048,
    Erudite,
}

impl GameKind {
    /// Every game, in declaration order.
    pub const ALL: [GameKind; 4] = [
        GameKind::TicTacToe,
        GameKind::Checkers,
        GameKind::Game2048,
        GameKind::Erudite,
    ];
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameKind::TicTacToe => "tic-tac-toe",
            GameKind::Checkers => "checkers",
            GameKind::Game2048 => "2048",
            GameKind::Erudite => "erudite",
        };
        f.write_str(name)
    }
}

/// One persisted game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", content = "state", rename_all = "snake_case", deny_unknown_fields)]
pub enum GameDocument {
    TicTacToe(TicTacToeState),
    Checkers(CheckersState),
    #[serde(rename = "2048")]
    Game2048(Game2048State),
    Erudite(EruditeState),
}

/// Binary layout. bincode is not self-describing, so snapshots use plain
/// variant indices instead of the JSON tag names.
#[derive(Serialize)]
enum SnapshotRef<'a> {
    TicTacToe(&'a TicTacToeState),
    Checkers(&'a CheckersState),
    Game2048(&'a Game2048State),
    Erudite(&'a EruditeState),
}

#[derive(Deserialize)]
enum Snapshot {
    TicTacToe(TicTacToeState),
    Checkers(CheckersState),
    Game2048(Game2048State),
    Erudite(EruditeState),
}

impl GameDocument {
    /// A new game of `kind`.
    pub fn fresh(kind: GameKind, rng: &mut GameRng) -> Self {
        match kind {
            GameKind::TicTacToe => GameDocument::TicTacToe(TicTacToe.new_game(rng)),
            GameKind::Checkers => GameDocument::Checkers(Checkers.new_game(rng)),
            GameKind::Game2048 => GameDocument::Game2048(Game2048.new_game(rng)),
            GameKind::Erudite => GameDocument::Erudite(Erudite::new().new_game(rng)),
        }
    }

    /// Which game this is.
    pub fn kind(&self) -> GameKind {
        match self {
            GameDocument::TicTacToe(_) => GameKind::TicTacToe,
            GameDocument::Checkers(_) => GameKind::Checkers,
            GameDocument::Game2048(_) => GameKind::Game2048,
            GameDocument::Erudite(_) => GameKind::Erudite,
        }
    }

    /// Check the contained state.
    pub fn validate(&self) -> Result<(), StateError> {
        match self {
            GameDocument::TicTacToe(state) => state.validate(),
            GameDocument::Checkers(state) => state.validate(),
            GameDocument::Game2048(state) => state.validate(),
            GameDocument::Erudite(state) => state.validate(),
        }
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Encode as a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StateError> {
        let snapshot = match self {
            GameDocument::TicTacToe(state) => SnapshotRef::TicTacToe(state),
            GameDocument::Checkers(state) => SnapshotRef::Checkers(state),
            GameDocument::Game2048(state) => SnapshotRef::Game2048(state),
            GameDocument::Erudite(state) => SnapshotRef::Erudite(state),
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    /// Decode and validate a binary snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StateError> {
        let document = match bincode::deserialize(bytes)? {
            Snapshot::TicTacToe(state) => GameDocument::TicTacToe(state),
            Snapshot::Checkers(state) => GameDocument::Checkers(state),
            Snapshot::Game2048(state) => GameDocument::Game2048(state),
            Snapshot::Erudite(state) => GameDocument::Erudite(state),
        };
        document.validate()?;
        Ok(document)
    }

    /// Decode `json` as a `kind` game, or start a new one if it can't be trusted.
    pub fn load_or_fresh(json: &str, kind: GameKind, rng: &mut GameRng) -> Self {
        match Self::from_json(json) {
            Ok(document) if document.kind() == kind => document,
            Ok(document) => {
                warn!(expected = %kind, found = %document.kind(), "stored game is for another game, starting fresh");
                Self::fresh(kind, rng)
            }
            Err(err) => {
                warn!(%err, game = %kind, "stored game rejected, starting fresh");
                Self::fresh(kind, rng)
            }
        }
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        match self {
            GameDocument::TicTacToe(state) => state.winner().is_some(),
            GameDocument::Checkers(state) => state.winner().is_some(),
            GameDocument::Game2048(state) => state.winner().is_some(),
            GameDocument::Erudite(state) => state.winner().is_some(),
        }
    }
}

/// A player move for any game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", content = "move", rename_all = "snake_case", deny_unknown_fields)]
pub enum MoveRequest {
    TicTacToe(Move),
    Checkers(Move),
    #[serde(rename = "2048")]
    Game2048(Direction),
    Erudite(EruditeMove),
}

impl MoveRequest {
    /// Which game this move is for.
    pub fn kind(&self) -> GameKind {
        match self {
            MoveRequest::TicTacToe(_) => GameKind::TicTacToe,
            MoveRequest::Checkers(_) => GameKind::Checkers,
            MoveRequest::Game2048(_) => GameKind::Game2048,
            MoveRequest::Erudite(_) => GameKind::Erudite,
        }
    }
}

/// Result of `play_document`.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentTurn {
    /// The updated game.
    pub document: GameDocument,
    /// Verdict from the player's point of view.
    pub outcome: TurnOutcome,
    /// How many moves the opponent made in reply.
    pub ai_moves: usize,
}

/// Play one player turn against a stored game, with the built-in opponent
/// for that game answering.
///
/// `rng` is advanced past every random choice made, so the caller can
/// persist it and continue the same stream next turn.
///
/// # Errors
///
/// `IllegalMove` when the request is for a different game than the
/// document, otherwise whatever the engine rejects the move with.
pub fn play_document(
    document: &GameDocument,
    request: &MoveRequest,
    config: &SessionConfig,
    rng: &mut GameRng,
) -> Result<DocumentTurn, MoveError> {
    let ai = config.ai.clone();
    let turn = match (document, request) {
        (GameDocument::TicTacToe(state), MoveRequest::TicTacToe(mv)) => {
            let session = Session::new(TicTacToe, config.clone()).with_opponent(TicTacToeAi::new(ai));
            run(session, rng, state, mv, GameDocument::TicTacToe)
        }
        (GameDocument::Checkers(state), MoveRequest::Checkers(mv)) => {
            let session = Session::new(Checkers, config.clone()).with_opponent(CheckersAi);
            run(session, rng, state, mv, GameDocument::Checkers)
        }
        (GameDocument::Game2048(state), MoveRequest::Game2048(direction)) => {
            let session = Session::new(Game2048, config.clone());
            run(session, rng, state, direction, GameDocument::Game2048)
        }
        (GameDocument::Erudite(state), MoveRequest::Erudite(mv)) => {
            let session = Session::new(Erudite::new(), config.clone()).with_opponent(EruditeAi::new(ai));
            run(session, rng, state, mv, GameDocument::Erudite)
        }
        (document, request) => Err(MoveError::illegal(format!(
            "{} move sent to a {} game",
            request.kind(),
            document.kind()
        ))),
    }?;
    debug!(game = %turn.document.kind(), outcome = ?turn.outcome, "document turn played");
    Ok(turn)
}

fn run<R: Rules>(
    session: Session<R>,
    rng: &mut GameRng,
    state: &R::State,
    mv: &R::Move,
    wrap: fn(R::State) -> GameDocument,
) -> Result<DocumentTurn, MoveError> {
    let mut session = session.with_rng_state(&rng.state());
    let report = session.play_turn(state, mv)?;
    *rng = GameRng::from_state(&session.rng_state());
    Ok(DocumentTurn {
        document: wrap(report.state),
        outcome: report.outcome,
        ai_moves: report.ai_moves.len(),
    })
}
