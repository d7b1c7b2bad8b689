//! Piece moves shared by tic-tac-toe and checkers.
//!
//! A move is a destination plus optional origin and optional captured square:
//! - "Place a mark" = destination only
//! - "Step a piece" = origin + destination
//! - "Jump a piece" = origin + destination + the square jumped over
//!
//! 2048 and Erudite have their own move types.

use serde::{Deserialize, Serialize};

use super::grid::Coord;

/// A move on a board of owned pieces.
///
/// ## Example
///
/// ```
/// use board_engines::core::{Coord, Move};
///
/// let mark = Move::place(Coord::new(1, 1));
/// assert!(mark.from.is_none());
///
/// let jump = Move::jump(Coord::new(4, 1), Coord::new(3, 2), Coord::new(2, 3));
/// assert!(jump.is_capture());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Move {
    /// Square the piece leaves, if a piece moves.
    pub from: Option<Coord>,
    /// Square the mark or piece lands on.
    pub to: Coord,
    /// Square of the piece removed by this move.
    pub capture: Option<Coord>,
}

impl Move {
    /// Put a new mark on an empty square.
    #[must_use]
    pub const fn place(to: Coord) -> Self {
        Self {
            from: None,
            to,
            capture: None,
        }
    }

    /// Move a piece without capturing.
    #[must_use]
    pub const fn step(from: Coord, to: Coord) -> Self {
        Self {
            from: Some(from),
            to,
            capture: None,
        }
    }

    /// Jump a piece over `over`, removing it.
    #[must_use]
    pub const fn jump(from: Coord, over: Coord, to: Coord) -> Self {
        Self {
            from: Some(from),
            to,
            capture: Some(over),
        }
    }

    /// Check if this move removes a piece.
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.from, self.capture) {
            (Some(from), Some(over)) => write!(f, "{from} x{over} -> {}", self.to),
            (Some(from), None) => write!(f, "{from} -> {}", self.to),
            (None, _) => write!(f, "{}", self.to),
        }
    }
}
