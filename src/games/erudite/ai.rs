//! Greedy Erudite opponent.
//!
//! Scans every row, then every column, for runs of up to
//! `erudite_max_tiles` empty squares that could connect to the board, tries
//! each ordering of rack tiles on them, and keeps the first highest-scoring
//! placement the engine accepts. With nothing scoring above zero it passes.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::game::{Erudite, EruditeMove, EruditeState, Placements};
use super::tiles::{Placement, Tile, CENTER, RACK_SIZE, SIZE};
use crate::ai::MovePolicy;
use crate::core::{AiConfig, Coord, GameRng};

type Arrangement = SmallVec<[Tile; RACK_SIZE]>;

/// Greedy Erudite opponent.
#[derive(Clone, Debug, Default)]
pub struct EruditeAi {
    config: AiConfig,
}

impl EruditeAi {
    /// Create an opponent from configuration.
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Highest-scoring placement for the side to move, with its score.
    ///
    /// Tiles already pending count as part of the rack.
    #[must_use]
    pub fn best_play(&self, engine: &Erudite, state: &EruditeState) -> Option<(Placements, u32)> {
        let side = state.current_player();
        let holding: Vec<Tile> = state
            .rack(side)
            .iter()
            .copied()
            .chain(state.pending_move().iter().map(|p| p.tile))
            .collect();
        let max_tiles = self.config.erudite_max_tiles.clamp(1, RACK_SIZE).min(holding.len());
        if max_tiles == 0 {
            return None;
        }

        let by_len: Vec<Vec<Arrangement>> = (0..=max_tiles).map(|len| arrangements(&holding, len)).collect();
        let first_move = state.is_board_empty();

        let mut best: Option<(Placements, u32)> = None;
        let mut tried = 0usize;
        for across in [true, false] {
            for line in 0..SIZE {
                for start in 0..SIZE {
                    let run = empty_run(state, across, line, start, max_tiles);
                    for len in 1..=run.len() {
                        let span = &run[..len];
                        if !reaches_board(state, span, first_move) {
                            continue;
                        }
                        for tiles in &by_len[len] {
                            let placements: Placements = span
                                .iter()
                                .zip(tiles)
                                .map(|(&coord, &tile)| self.placement(coord, tile))
                                .collect();
                            tried += 1;
                            let Ok(scored) = engine.score_placements(state, &placements) else {
                                continue;
                            };
                            if best.as_ref().map_or(true, |(_, score)| scored.total > *score) {
                                trace!(total = scored.total, words = ?scored.words, "erudite AI candidate");
                                best = Some((placements, scored.total));
                            }
                        }
                    }
                }
            }
        }

        debug!(tried, best = best.as_ref().map(|(_, score)| *score), "erudite AI search");
        best
    }

    /// The move to make: the best placement, or a pass when nothing scores.
    #[must_use]
    pub fn choose(&self, engine: &Erudite, state: &EruditeState) -> EruditeMove {
        match self.best_play(engine, state) {
            Some((placements, score)) if score > 0 => EruditeMove::Play(placements),
            _ => EruditeMove::Pass,
        }
    }

    fn placement(&self, coord: Coord, tile: Tile) -> Placement {
        match tile {
            Tile::Letter(letter) => Placement::letter(coord, letter),
            Tile::Blank => Placement::blank(coord, self.config.blank_face),
        }
    }
}

impl MovePolicy<Erudite> for EruditeAi {
    fn choose_move(&self, engine: &Erudite, state: &EruditeState, _rng: &mut GameRng) -> Option<EruditeMove> {
        if state.winner().is_some() {
            return None;
        }
        Some(self.choose(engine, state))
    }
}

/// Up to `max` empty squares from `start` along the line, skipping filled ones.
fn empty_run(state: &EruditeState, across: bool, line: usize, start: usize, max: usize) -> SmallVec<[Coord; RACK_SIZE]> {
    let at = |k: usize| {
        if across {
            Coord::new(line, k)
        } else {
            Coord::new(k, line)
        }
    };
    if state.tile_at(at(start)).is_some() {
        return SmallVec::new();
    }
    (start..SIZE)
        .map(at)
        .filter(|&c| state.tile_at(c).is_none())
        .take(max)
        .collect()
}

fn reaches_board(state: &EruditeState, span: &[Coord], first_move: bool) -> bool {
    if first_move {
        return span.contains(&CENTER);
    }
    span.iter().any(|c| {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(|(dr, dc)| c.offset(dr, dc, SIZE))
            .any(|n| state.tile_at(n).is_some())
    })
}

/// Distinct orderings of `len` tiles drawn from `tiles`, in index order.
fn arrangements(tiles: &[Tile], len: usize) -> Vec<Arrangement> {
    fn extend(
        tiles: &[Tile],
        len: usize,
        used: &mut [bool],
        current: &mut Arrangement,
        seen: &mut FxHashSet<Arrangement>,
        out: &mut Vec<Arrangement>,
    ) {
        if current.len() == len {
            if seen.insert(current.clone()) {
                out.push(current.clone());
            }
            return;
        }
        for i in 0..tiles.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            current.push(tiles[i]);
            extend(tiles, len, used, current, seen, out);
            current.pop();
            used[i] = false;
        }
    }

    let mut out = Vec::new();
    if len == 0 || len > tiles.len() {
        return out;
    }
    let mut seen = FxHashSet::default();
    extend(
        tiles,
        len,
        &mut vec![false; tiles.len()],
        &mut Arrangement::new(),
        &mut seen,
        &mut out,
    );
    out
}
