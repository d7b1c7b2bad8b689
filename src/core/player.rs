//! Sides and verdicts.
//!
//! ## Side
//!
//! Every game here is played by the human `Player` against the built-in
//! `Opponent` (the AI). 2048 only ever has the `Player` side.
//!
//! ## Outcome / TurnOutcome
//!
//! `Outcome` is what a finished game stores in its `winner` field.
//! `TurnOutcome` is the verdict handed back to the caller after a turn.

use serde::{Deserialize, Serialize};

/// One of the two sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human side.
    Player,
    /// The built-in AI side.
    Opponent,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Both sides, player first.
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Final result stored in a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The human side won.
    PlayerWin,
    /// The AI side won.
    OpponentWin,
    /// Nobody won.
    Draw,
}

impl Outcome {
    /// Outcome where `side` is the winner.
    #[must_use]
    pub const fn for_winner(side: Side) -> Self {
        match side {
            Side::Player => Outcome::PlayerWin,
            Side::Opponent => Outcome::OpponentWin,
        }
    }

    /// Check if `side` won.
    #[must_use]
    pub fn is_winner(self, side: Side) -> bool {
        self == Outcome::for_winner(side)
    }
}

/// Verdict returned to the caller after a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The game goes on and the player is to move.
    Continue,
    /// Game over, the player won.
    PlayerWin,
    /// Game over, the AI won.
    OpponentWin,
    /// Game over, nobody won.
    Draw,
    /// The player captured and must capture again with the same piece.
    MustContinueCapture,
}

impl From<Outcome> for TurnOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::PlayerWin => TurnOutcome::PlayerWin,
            Outcome::OpponentWin => TurnOutcome::OpponentWin,
            Outcome::Draw => TurnOutcome::Draw,
        }
    }
}

impl TurnOutcome {
    /// Whether the game has ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TurnOutcome::PlayerWin | TurnOutcome::OpponentWin | TurnOutcome::Draw
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_other() {
        assert_eq!(Side::Player.other(), Side::Opponent);
        assert_eq!(Side::Opponent.other(), Side::Player);
        assert_eq!(format!("{}", Side::Player), "player");
    }

    #[test]
    fn test_outcome_is_winner() {
        assert!(Outcome::PlayerWin.is_winner(Side::Player));
        assert!(!Outcome::PlayerWin.is_winner(Side::Opponent));
        assert!(!Outcome::Draw.is_winner(Side::Player));
        assert!(!Outcome::Draw.is_winner(Side::Opponent));
        assert_eq!(Outcome::for_winner(Side::Opponent), Outcome::OpponentWin);
    }

    #[test]
    fn test_turn_outcome_from_outcome() {
        assert_eq!(TurnOutcome::from(Outcome::Draw), TurnOutcome::Draw);
        assert!(TurnOutcome::from(Outcome::PlayerWin).is_terminal());
        assert!(!TurnOutcome::Continue.is_terminal());
        assert!(!TurnOutcome::MustContinueCapture.is_terminal());
    }
}
