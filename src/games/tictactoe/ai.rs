//! Tic-tac-toe opponent.
//!
//! Three tiers:
//! - **Easy**: uniform random empty square
//! - **Medium**: win now, else block, else favour the centre
//! - **Hard**: exhaustive minimax over the remaining game tree

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::game::{line_winner, TicTacToe, TicTacToeState, SIZE};
use crate::ai::MovePolicy;
use crate::core::{AiConfig, Coord, Difficulty, GameRng, Move, Side};

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];
const EDGES: [usize; 4] = [1, 3, 5, 7];

type Owners = [Option<Side>; 9];

/// Tic-tac-toe opponent at a fixed difficulty.
#[derive(Clone, Debug, Default)]
pub struct TicTacToeAi {
    config: AiConfig,
}

impl TicTacToeAi {
    /// Create an opponent from configuration.
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Opponent at the given tier with default knobs.
    #[must_use]
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::default().with_difficulty(difficulty))
    }

    /// Pick a square for the side to move, or `None` on a finished game.
    #[must_use]
    pub fn choose_cell(&self, state: &TicTacToeState, rng: &mut GameRng) -> Option<Coord> {
        if state.winner().is_some() {
            return None;
        }
        let owners = state.owners();
        let me = state.current_player();

        let index = match self.config.difficulty {
            Difficulty::Easy => random_empty(&owners, rng),
            Difficulty::Medium => self.medium(&owners, me, rng),
            Difficulty::Hard => best_by_minimax(&owners, me),
        }?;

        debug!(difficulty = ?self.config.difficulty, index, "tic-tac-toe AI move");
        Some(Coord::from_index(index, SIZE))
    }

    fn medium(&self, owners: &Owners, me: Side, rng: &mut GameRng) -> Option<usize> {
        if let Some(win) = winning_square(owners, me) {
            return Some(win);
        }
        if let Some(block) = winning_square(owners, me.other()) {
            return Some(block);
        }

        if owners[CENTER].is_none() {
            if rng.gen_bool(self.config.center_weight.clamp(0.0, 1.0)) {
                return Some(CENTER);
            }
            let corners: Vec<usize> = CORNERS.into_iter().filter(|&i| owners[i].is_none()).collect();
            if let Some(&corner) = rng.choose(&corners) {
                return Some(corner);
            }
            let edges: Vec<usize> = EDGES.into_iter().filter(|&i| owners[i].is_none()).collect();
            if let Some(&edge) = rng.choose(&edges) {
                return Some(edge);
            }
            return Some(CENTER);
        }

        random_empty(owners, rng)
    }
}

impl MovePolicy<TicTacToe> for TicTacToeAi {
    fn choose_move(
        &self,
        _engine: &TicTacToe,
        state: &TicTacToeState,
        rng: &mut GameRng,
    ) -> Option<Move> {
        self.choose_cell(state, rng).map(Move::place)
    }
}

fn empties(owners: &Owners) -> impl Iterator<Item = usize> + '_ {
    (0..9).filter(|&i| owners[i].is_none())
}

fn random_empty(owners: &Owners, rng: &mut GameRng) -> Option<usize> {
    let cells: Vec<usize> = empties(owners).collect();
    rng.choose(&cells).copied()
}

/// First empty square (in index order) that completes a line for `side`.
fn winning_square(owners: &Owners, side: Side) -> Option<usize> {
    empties(owners).find(|&i| {
        let mut probe = *owners;
        probe[i] = Some(side);
        line_winner(&probe) == Some(side)
    })
}

/// Best square for `me` by full-depth minimax; ties go to the lowest index.
fn best_by_minimax(owners: &Owners, me: Side) -> Option<usize> {
    let mut memo = FxHashMap::default();
    let mut best: Option<(usize, i8)> = None;

    for i in empties(owners) {
        let mut next = *owners;
        next[i] = Some(me);
        let score = minimax(&mut next, me.other(), me, &mut memo);
        trace!(index = i, score, "minimax root candidate");
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }

    best.map(|(i, _)| i)
}

/// Value of `owners` for `me` with `to_move` to play: +1 win, -1 loss, 0 draw.
fn minimax(owners: &mut Owners, to_move: Side, me: Side, memo: &mut FxHashMap<u32, i8>) -> i8 {
    if let Some(winner) = line_winner(owners) {
        return if winner == me { 1 } else { -1 };
    }
    if owners.iter().all(Option::is_some) {
        return 0;
    }

    let key = encode(owners, to_move);
    if let Some(&value) = memo.get(&key) {
        return value;
    }

    let maximizing = to_move == me;
    let mut best = if maximizing { i8::MIN } else { i8::MAX };
    for i in 0..9 {
        if owners[i].is_some() {
            continue;
        }
        owners[i] = Some(to_move);
        let score = minimax(owners, to_move.other(), me, memo);
        owners[i] = None;
        best = if maximizing { best.max(score) } else { best.min(score) };
    }

    memo.insert(key, best);
    best
}

/// Base-3 board code with the side to move in the top bit.
fn encode(owners: &Owners, to_move: Side) -> u32 {
    let code = owners.iter().fold(0u32, |acc, owner| {
        acc * 3
            + match owner {
                None => 0,
                Some(Side::Player) => 1,
                Some(Side::Opponent) => 2,
            }
    });
    match to_move {
        Side::Player => code,
        Side::Opponent => code | (1 << 31),
    }
}
