use super::grid::Coord;
use super::player::Side;

/// Reasons a proposed move is rejected.
///
/// Returned as values at the engine boundary; the state passed in is left
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("cell {0} is already occupied")]
    CellOccupied(Coord),

    #[error("coordinate {0} is outside the board")]
    OutOfBounds(Coord),

    #[error("game is already over")]
    GameAlreadyOver,

    #[error("it is not the {0}'s turn")]
    NotCurrentPlayersTurn(Side),
}

impl MoveError {
    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        MoveError::IllegalMove(reason.into())
    }
}

/// A persisted game document that cannot be trusted.
///
/// Fatal to the session: callers start a fresh game instead of repairing it.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to parse game document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode game snapshot: {0}")]
    Binary(#[from] bincode::Error),

    #[error("invalid game state: {0}")]
    Invalid(String),
}

impl StateError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StateError::Invalid(reason.into())
    }
}
