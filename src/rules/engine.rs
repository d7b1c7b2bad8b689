//! Rules trait for game implementations.
//!
//! Games implement `Rules` to define:
//! - What moves are legal
//! - How moves produce a new state
//! - When the game is over

use crate::core::{GameRng, MoveError, Outcome, Side};

/// Rules of one game.
///
/// States are values: `apply_move` never mutates its input and returns a
/// fresh state, so a rejected move leaves the caller's state untouched.
///
/// ## Implementation Notes
///
/// - `legal_moves`: moves for the side to move; empty once the game is over
/// - `apply_move`: must only consult randomness through `rng`
/// - `outcome`: `None` while the game continues
/// - `must_continue`: true while the side to move is in a forced continuation
pub trait Rules {
    /// Complete game state.
    type State: Clone + std::fmt::Debug;

    /// One move, as submitted by a side.
    type Move: Clone + std::fmt::Debug;

    /// Fresh game with its initial layout.
    fn new_game(&self, rng: &mut GameRng) -> Self::State;

    /// Side whose turn it is.
    fn side_to_move(&self, state: &Self::State) -> Side;

    /// Every legal move for the side to move.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Apply a move submitted by `side`.
    fn apply_move(
        &self,
        state: &Self::State,
        side: Side,
        mv: &Self::Move,
        rng: &mut GameRng,
    ) -> Result<Self::State, MoveError>;

    /// Final result, if the game has ended.
    fn outcome(&self, state: &Self::State) -> Option<Outcome>;

    /// Whether the side to move is mid-way through a forced sequence.
    fn must_continue(&self, _state: &Self::State) -> bool {
        false
    }

    // === Convenience Methods ===

    /// Reject moves on finished games and moves from the wrong side.
    fn check_turn(&self, state: &Self::State, side: Side) -> Result<(), MoveError> {
        if self.outcome(state).is_some() {
            return Err(MoveError::GameAlreadyOver);
        }
        if self.side_to_move(state) != side {
            return Err(MoveError::NotCurrentPlayersTurn(side));
        }
        Ok(())
    }
}
