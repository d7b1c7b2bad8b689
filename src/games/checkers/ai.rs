//! Checkers opponent: random within a fixed priority order.
//!
//! 1. Any capture (mandatory capture means these are the only legal moves
//!    whenever one exists)
//! 2. Any move that advances toward the far side
//! 3. Anything legal

use tracing::debug;

use super::game::{forward, Checkers, CheckersState};
use crate::ai::MovePolicy;
use crate::core::{GameRng, Move};

/// Heuristic checkers opponent.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckersAi;

impl CheckersAi {
    /// Pick a move for the side to move, or `None` if it has none.
    #[must_use]
    pub fn choose(&self, state: &CheckersState, rng: &mut GameRng) -> Option<Move> {
        let side = state.current_player();
        let moves = Checkers.legal_moves_for(state, side);

        let captures: Vec<Move> = moves.iter().copied().filter(Move::is_capture).collect();
        if let Some(&mv) = rng.choose(&captures) {
            debug!(%mv, "checkers AI capture");
            return Some(mv);
        }

        let advancing: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|mv| {
                mv.from.map_or(false, |from| {
                    mv.to.row as isize - from.row as isize == forward(side)
                })
            })
            .collect();
        if let Some(&mv) = rng.choose(&advancing) {
            debug!(%mv, "checkers AI advance");
            return Some(mv);
        }

        rng.choose(&moves).copied()
    }
}

impl MovePolicy<Checkers> for CheckersAi {
    fn choose_move(&self, _engine: &Checkers, state: &CheckersState, rng: &mut GameRng) -> Option<Move> {
        self.choose(state, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coord, Side};
    use crate::games::checkers::Rank;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_prefers_capture() {
        let state = CheckersState::from_pieces(
            &[
                (c(2, 3), Side::Opponent, Rank::Man),
                (c(0, 1), Side::Opponent, Rank::Man),
                (c(3, 4), Side::Player, Rank::Man),
                (c(6, 1), Side::Player, Rank::Man),
            ],
            Side::Opponent,
        )
        .unwrap();
        for seed in 0..10 {
            let mv = CheckersAi.choose(&state, &mut GameRng::new(seed)).unwrap();
            assert_eq!(mv, Move::jump(c(2, 3), c(3, 4), c(4, 5)));
        }
    }

    #[test]
    fn test_king_prefers_advancing() {
        // Opponent king in the middle: forward for the opponent is downward
        let state = CheckersState::from_pieces(
            &[(c(3, 4), Side::Opponent, Rank::King), (c(7, 0), Side::Player, Rank::King)],
            Side::Opponent,
        )
        .unwrap();
        for seed in 0..10 {
            let mv = CheckersAi.choose(&state, &mut GameRng::new(seed)).unwrap();
            assert_eq!(mv.to.row, 4, "picked {mv}");
        }
    }

    #[test]
    fn test_falls_back_to_retreat() {
        // Opponent king on the bottom row can only move up
        let state = CheckersState::from_pieces(
            &[(c(7, 2), Side::Opponent, Rank::King), (c(1, 0), Side::Player, Rank::King)],
            Side::Opponent,
        )
        .unwrap();
        let mv = CheckersAi.choose(&state, &mut GameRng::new(3)).unwrap();
        assert_eq!(mv.to.row, 6);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let state = CheckersState::new();
        let a = CheckersAi.choose(&state, &mut GameRng::new(11));
        let b = CheckersAi.choose(&state, &mut GameRng::new(11));
        assert_eq!(a, b);
    }
}
