//! Opponent policies.
//!
//! Policies are trait-based so the session loop can drive any opponent:
//! - `MovePolicy`: picks one move for the side to move
//! - `UniformRandom`: any legal move, uniformly
//!
//! Game-specific opponents live beside their engines in `games`.

use crate::core::GameRng;
use crate::rules::Rules;

/// Chooses a move for the side to move.
///
/// Policies are stateless between calls: everything they need is in the
/// state, the engine, and the RNG they are handed. Returning `None` means
/// the policy has nothing to play.
pub trait MovePolicy<R: Rules>: Send + Sync {
    /// Pick a move.
    fn choose_move(&self, engine: &R, state: &R::State, rng: &mut GameRng) -> Option<R::Move>;
}

/// Uniform random selection over legal moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformRandom;

impl<R: Rules> MovePolicy<R> for UniformRandom {
    fn choose_move(&self, engine: &R, state: &R::State, rng: &mut GameRng) -> Option<R::Move> {
        let moves = engine.legal_moves(state);
        rng.choose(&moves).cloned()
    }
}
