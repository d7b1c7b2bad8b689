//! Erudite rules: a 15x15 word game with racks, a shared bag, and premium squares.
//!
//! A turn builds up a `pending_move` one tile at a time (`Place`/`Remove`),
//! then either scores it (`Confirm`), takes it back (`Clear`), or gives the
//! turn away (`Pass`). `Play` does place-all-then-confirm in one step and is
//! what the built-in opponent submits.
//!
//! ## Validation of a confirmed move
//!
//! - every tile in one row or one column, with no empty square between them
//! - the very first move covers the centre square
//! - later moves touch a tile already on the board
//! - at least one word of two or more letters is formed
//! - with a word list configured, every formed word is in it
//!
//! ## Game end
//!
//! The game ends when the bag is empty and one side holds no tiles, when no
//! square can take a tile, or after four passes in a row. Higher score wins.

use std::cmp::Ordering;
use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, instrument};

use super::tiles::{
    full_set, is_letter, standard_layout, Bonus, Placed, Placement, Tile, CENTER, RACK_SIZE, SIZE,
    TOTAL_TILES,
};
use super::words::WordList;
use crate::core::{Coord, GameRng, Grid, MoveError, Outcome, Side, StateError};
use crate::rules::Rules;

/// Tiles on the board.
pub type Board = Grid<Option<Placed>, SIZE>;

/// Premium squares.
pub type Bonuses = Grid<Bonus, SIZE>;

/// A rack of at most seven tiles.
pub type Rack = SmallVec<[Tile; RACK_SIZE]>;

/// Tiles placed in one turn.
pub type Placements = SmallVec<[Placement; RACK_SIZE]>;

/// Consecutive passes that end the game.
pub const PASS_LIMIT: u8 = 4;

/// One Erudite action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EruditeMove {
    /// Put one rack tile into the pending move.
    Place(Placement),
    /// Take a pending tile back to the rack.
    Remove(Coord),
    /// Return every pending tile to the rack.
    Clear,
    /// Score the pending move and end the turn.
    Confirm,
    /// Place all of these tiles and confirm.
    Play(Placements),
    /// Give up the turn, returning any pending tiles.
    Pass,
}

/// Words formed by a placement and what they score.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoredPlay {
    /// Each word with its score, main word first.
    pub words: Vec<(String, u32)>,
    /// Sum over all words.
    pub total: u32,
}

/// Complete Erudite state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EruditeState {
    board: Board,
    bonus_cells: Bonuses,
    player_rack: Rack,
    opponent_rack: Rack,
    bag: Vector<Tile>,
    pending_move: Placements,
    move_number: u32,
    current_player: Side,
    winner: Option<Outcome>,
    player_score: u32,
    opponent_score: u32,
    consecutive_passes: u8,
}

impl EruditeState {
    /// Shuffle a full set into the bag and deal both racks, player first.
    #[must_use]
    pub fn new(rng: &mut GameRng) -> Self {
        let mut tiles = full_set();
        rng.shuffle(&mut tiles);
        let mut state = Self::empty(tiles.into_iter().collect(), Side::Player);
        state.refill(Side::Player);
        state.refill(Side::Opponent);
        state
    }

    /// Build a position from tiles already on the board and both racks.
    ///
    /// The bag receives whatever is left of the full set, in set order.
    ///
    /// # Errors
    ///
    /// `StateError::Invalid` if the tiles are not drawn from one full set or
    /// the position breaks any other state rule.
    pub fn from_parts(
        board_tiles: &[(Coord, Placed)],
        player_rack: &[Tile],
        opponent_rack: &[Tile],
        current_player: Side,
    ) -> Result<Self, StateError> {
        let mut remaining = full_set();
        let mut take = |tile: Tile| -> Result<(), StateError> {
            let pos = remaining
                .iter()
                .position(|t| *t == tile)
                .ok_or_else(|| StateError::invalid(format!("no {tile} tile left in the set")))?;
            remaining.remove(pos);
            Ok(())
        };
        for &(_, placed) in board_tiles {
            take(placed.tile)?;
        }
        for &tile in player_rack.iter().chain(opponent_rack) {
            take(tile)?;
        }

        let mut state = Self::empty(remaining.into_iter().collect(), current_player);
        for &(coord, placed) in board_tiles {
            let square = state
                .board
                .get_mut(coord)
                .ok_or_else(|| StateError::invalid(format!("tile placed off the board at {coord}")))?;
            *square = Some(placed);
        }
        state.player_rack = player_rack.iter().copied().collect();
        state.opponent_rack = opponent_rack.iter().copied().collect();
        if !board_tiles.is_empty() {
            state.move_number = 1;
        }
        state.winner = state.verdict();
        state.validate()?;
        Ok(state)
    }

    fn empty(bag: Vector<Tile>, current_player: Side) -> Self {
        Self {
            board: Grid::filled(None),
            bonus_cells: standard_layout(),
            player_rack: Rack::new(),
            opponent_rack: Rack::new(),
            bag,
            pending_move: Placements::new(),
            move_number: 0,
            current_player,
            winner: None,
            player_score: 0,
            opponent_score: 0,
            consecutive_passes: 0,
        }
    }

    /// Tiles on the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Premium squares.
    #[must_use]
    pub fn bonus_cells(&self) -> &Bonuses {
        &self.bonus_cells
    }

    /// The tile on `coord`, if any.
    #[must_use]
    pub fn tile_at(&self, coord: Coord) -> Option<Placed> {
        self.board.get(coord).copied().flatten()
    }

    /// `side`'s rack.
    #[must_use]
    pub fn rack(&self, side: Side) -> &[Tile] {
        match side {
            Side::Player => &self.player_rack,
            Side::Opponent => &self.opponent_rack,
        }
    }

    fn rack_mut(&mut self, side: Side) -> &mut Rack {
        match side {
            Side::Player => &mut self.player_rack,
            Side::Opponent => &mut self.opponent_rack,
        }
    }

    /// Tiles still to be drawn, next draw first.
    #[must_use]
    pub fn bag(&self) -> &Vector<Tile> {
        &self.bag
    }

    /// Tiles placed this turn but not yet confirmed.
    #[must_use]
    pub fn pending_move(&self) -> &[Placement] {
        &self.pending_move
    }

    /// Confirmed moves and passes so far.
    #[must_use]
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Side to move.
    #[must_use]
    pub fn current_player(&self) -> Side {
        self.current_player
    }

    /// Final result, once set.
    #[must_use]
    pub fn winner(&self) -> Option<Outcome> {
        self.winner
    }

    /// `side`'s score.
    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Opponent => self.opponent_score,
        }
    }

    /// Passes in a row, reset by any confirmed move.
    #[must_use]
    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    /// Whether no tile has been confirmed yet.
    #[must_use]
    pub fn is_board_empty(&self) -> bool {
        self.board.as_slice().iter().all(Option::is_none)
    }

    /// Every tile in the game: bag, both racks, board, and pending.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.bag.len()
            + self.player_rack.len()
            + self.opponent_rack.len()
            + self.board.as_slice().iter().flatten().count()
            + self.pending_move.len()
    }

    /// Tiles `side` holds, counting its pending tiles.
    fn holding(&self, side: Side) -> usize {
        let pending = if side == self.current_player {
            self.pending_move.len()
        } else {
            0
        };
        self.rack(side).len() + pending
    }

    fn is_pending(&self, coord: Coord) -> bool {
        self.pending_move.iter().any(|p| p.coord == coord)
    }

    fn is_free(&self, coord: Coord) -> bool {
        matches!(self.board.get(coord), Some(None)) && !self.is_pending(coord)
    }

    /// Whether any square could still take a tile.
    fn has_open_square(&self) -> bool {
        if self.is_board_empty() {
            return true;
        }
        self.board.iter().any(|(coord, square)| {
            square.is_none() && neighbours(coord).any(|n| self.tile_at(n).is_some())
        })
    }

    fn verdict(&self) -> Option<Outcome> {
        let finished = self.consecutive_passes >= PASS_LIMIT
            || (self.bag.is_empty() && Side::BOTH.iter().any(|&side| self.holding(side) == 0))
            || !self.has_open_square();
        if !finished {
            return None;
        }
        Some(match self.player_score.cmp(&self.opponent_score) {
            Ordering::Greater => Outcome::PlayerWin,
            Ordering::Less => Outcome::OpponentWin,
            Ordering::Equal => Outcome::Draw,
        })
    }

    fn refill(&mut self, side: Side) {
        while self.rack(side).len() < RACK_SIZE {
            let Some(tile) = self.bag.pop_front() else {
                break;
            };
            self.rack_mut(side).push(tile);
        }
    }

    fn take_back_pending(&mut self) {
        let side = self.current_player;
        let pending = std::mem::take(&mut self.pending_move);
        self.rack_mut(side).extend(pending.into_iter().map(|p| p.tile));
    }

    fn end_turn(&mut self) {
        self.move_number += 1;
        self.current_player = self.current_player.other();
        self.winner = self.verdict();
    }

    /// Check that a decoded state could have arisen from play.
    pub fn validate(&self) -> Result<(), StateError> {
        for side in Side::BOTH {
            if self.holding(side) > RACK_SIZE {
                return Err(StateError::invalid(format!(
                    "{side} holds {} tiles, more than {RACK_SIZE}",
                    self.holding(side)
                )));
            }
        }

        if self.bonus_cells != standard_layout() {
            return Err(StateError::invalid("erudite premium squares differ from the standard layout"));
        }

        for (coord, square) in self.board.iter() {
            if let Some(placed) = square {
                if !placed.tile.can_show(placed.face) {
                    return Err(StateError::invalid(format!(
                        "tile {} at {coord} cannot show '{}'",
                        placed.tile, placed.face
                    )));
                }
            }
        }
        for (i, p) in self.pending_move.iter().enumerate() {
            if !matches!(self.board.get(p.coord), Some(None)) {
                return Err(StateError::invalid(format!("pending tile on unavailable square {}", p.coord)));
            }
            if self.pending_move[..i].iter().any(|q| q.coord == p.coord) {
                return Err(StateError::invalid(format!("two pending tiles on {}", p.coord)));
            }
            if !p.tile.can_show(p.face) {
                return Err(StateError::invalid(format!("pending tile {} cannot show '{}'", p.tile, p.face)));
            }
        }

        let mut counts: FxHashMap<Tile, isize> = FxHashMap::default();
        for tile in full_set() {
            *counts.entry(tile).or_default() += 1;
        }
        let in_play = self
            .bag
            .iter()
            .chain(&self.player_rack)
            .chain(&self.opponent_rack)
            .copied()
            .chain(self.board.as_slice().iter().flatten().map(|p| p.tile))
            .chain(self.pending_move.iter().map(|p| p.tile));
        for tile in in_play {
            *counts.entry(tile).or_default() -= 1;
        }
        if let Some((tile, _)) = counts.iter().find(|(_, &n)| n != 0) {
            return Err(StateError::invalid(format!(
                "tiles do not form one {TOTAL_TILES}-tile set (count of {tile} is off)"
            )));
        }

        if self.consecutive_passes > PASS_LIMIT {
            return Err(StateError::invalid("more consecutive passes than the game allows"));
        }
        if self.winner != self.verdict() {
            return Err(StateError::invalid("erudite winner does not match the position"));
        }
        Ok(())
    }

    /// Human-readable board: letters, `.` for empty, lower-case for pending.
    #[must_use]
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(SIZE * (SIZE + 1));
        for (coord, square) in self.board.iter() {
            let c = match (square, self.pending_move.iter().find(|p| p.coord == coord)) {
                (Some(placed), _) => placed.face,
                (None, Some(p)) => p.face.to_ascii_lowercase(),
                (None, None) => '.',
            };
            out.push(c);
            if coord.col == SIZE - 1 && coord.row != SIZE - 1 {
                out.push('\n');
            }
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Across,
    Down,
}

impl Axis {
    fn cross(self) -> Self {
        match self {
            Axis::Across => Axis::Down,
            Axis::Down => Axis::Across,
        }
    }

    fn step(self, coord: Coord, delta: isize) -> Option<Coord> {
        match self {
            Axis::Across => coord.offset(0, delta, SIZE),
            Axis::Down => coord.offset(delta, 0, SIZE),
        }
    }

    fn position(self, coord: Coord) -> usize {
        match self {
            Axis::Across => coord.col,
            Axis::Down => coord.row,
        }
    }

    fn at(self, anchor: Coord, position: usize) -> Coord {
        match self {
            Axis::Across => Coord::new(anchor.row, position),
            Axis::Down => Coord::new(position, anchor.col),
        }
    }
}

fn neighbours(coord: Coord) -> impl Iterator<Item = Coord> {
    [(-1, 0), (1, 0), (0, -1), (0, 1)]
        .into_iter()
        .filter_map(move |(dr, dc)| coord.offset(dr, dc, SIZE))
}

/// Erudite engine, optionally restricted to a word list.
#[derive(Clone, Debug, Default)]
pub struct Erudite {
    words: Option<Arc<WordList>>,
}

impl Erudite {
    /// Engine that accepts any letter sequence as a word.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that only accepts words in `words`.
    #[must_use]
    pub fn with_words(words: WordList) -> Self {
        Self {
            words: Some(Arc::new(words)),
        }
    }

    /// The configured word list.
    #[must_use]
    pub fn words(&self) -> Option<&WordList> {
        self.words.as_deref()
    }

    /// Fresh game.
    #[must_use]
    pub fn start(&self, rng: &mut GameRng) -> EruditeState {
        EruditeState::new(rng)
    }

    /// Put one rack tile into `side`'s pending move.
    ///
    /// # Errors
    ///
    /// `GameAlreadyOver`, `NotCurrentPlayersTurn`, `OutOfBounds`,
    /// `CellOccupied`, or `IllegalMove` when the tile is not on the rack or
    /// cannot show the requested letter.
    pub fn place_tile(
        &self,
        state: &EruditeState,
        side: Side,
        placement: Placement,
    ) -> Result<EruditeState, MoveError> {
        self.check_turn(state, side)?;
        let mut next = state.clone();
        place_into(&mut next, placement)?;
        Ok(next)
    }

    /// Take the pending tile on `coord` back to the rack.
    ///
    /// # Errors
    ///
    /// Turn errors, or `IllegalMove` when nothing is pending there.
    pub fn remove_tile(&self, state: &EruditeState, side: Side, coord: Coord) -> Result<EruditeState, MoveError> {
        self.check_turn(state, side)?;
        let pos = state
            .pending_move
            .iter()
            .position(|p| p.coord == coord)
            .ok_or_else(|| MoveError::illegal(format!("no pending tile at {coord}")))?;
        let mut next = state.clone();
        let placement = next.pending_move.remove(pos);
        next.rack_mut(side).push(placement.tile);
        Ok(next)
    }

    /// Return every pending tile to the rack.
    ///
    /// # Errors
    ///
    /// Turn errors only.
    pub fn clear_move(&self, state: &EruditeState, side: Side) -> Result<EruditeState, MoveError> {
        self.check_turn(state, side)?;
        let mut next = state.clone();
        next.take_back_pending();
        Ok(next)
    }

    /// Score the pending move, refill the rack, and pass the turn.
    ///
    /// # Errors
    ///
    /// Turn errors, or `IllegalMove` when nothing is pending or the
    /// placement breaks a placement rule.
    #[instrument(skip(self, state), fields(player = %side))]
    pub fn confirm_move(&self, state: &EruditeState, side: Side) -> Result<EruditeState, MoveError> {
        self.check_turn(state, side)?;
        let mut next = state.clone();
        self.confirm_in(&mut next, side)?;
        Ok(next)
    }

    /// Place every tile of `placements` and confirm, as one action.
    ///
    /// Anything already pending is returned to the rack first.
    ///
    /// # Errors
    ///
    /// Any error `place_tile` or `confirm_move` would return.
    #[instrument(skip(self, state, placements), fields(player = %side, tiles = placements.len()))]
    pub fn play(
        &self,
        state: &EruditeState,
        side: Side,
        placements: &[Placement],
    ) -> Result<EruditeState, MoveError> {
        self.check_turn(state, side)?;
        let mut next = state.clone();
        next.take_back_pending();
        for &placement in placements {
            place_into(&mut next, placement)?;
        }
        self.confirm_in(&mut next, side)?;
        Ok(next)
    }

    /// Give up the turn.
    ///
    /// # Errors
    ///
    /// Turn errors only.
    #[instrument(skip(self, state), fields(player = %side))]
    pub fn pass(&self, state: &EruditeState, side: Side) -> Result<EruditeState, MoveError> {
        self.check_turn(state, side)?;
        let mut next = state.clone();
        next.take_back_pending();
        next.consecutive_passes = next.consecutive_passes.saturating_add(1).min(PASS_LIMIT);
        next.end_turn();
        debug!(passes = next.consecutive_passes, "erudite pass");
        Ok(next)
    }

    fn confirm_in(&self, state: &mut EruditeState, side: Side) -> Result<(), MoveError> {
        if state.pending_move.is_empty() {
            return Err(MoveError::illegal("no tiles placed"));
        }
        let scored = self.evaluate(&state.board, &state.bonus_cells, &state.pending_move)?;

        for placement in std::mem::take(&mut state.pending_move) {
            state.board.set(placement.coord, Some(placement.placed()))?;
        }
        match side {
            Side::Player => state.player_score += scored.total,
            Side::Opponent => state.opponent_score += scored.total,
        }
        state.refill(side);
        state.consecutive_passes = 0;
        state.end_turn();
        debug!(words = ?scored.words, total = scored.total, "erudite move confirmed");
        Ok(())
    }

    /// Score `placements` against `state`'s board without changing anything.
    ///
    /// Ignores racks and turn order; only the placement rules apply.
    ///
    /// # Errors
    ///
    /// `OutOfBounds`, `CellOccupied`, or `IllegalMove` for a placement that
    /// could not be confirmed.
    pub fn score_placements(&self, state: &EruditeState, placements: &[Placement]) -> Result<ScoredPlay, MoveError> {
        self.evaluate(&state.board, &state.bonus_cells, placements)
    }

    fn evaluate(&self, board: &Board, bonuses: &Bonuses, placements: &[Placement]) -> Result<ScoredPlay, MoveError> {
        let first = placements
            .first()
            .ok_or_else(|| MoveError::illegal("no tiles placed"))?;

        let mut fresh: FxHashMap<Coord, Placed> = FxHashMap::default();
        for p in placements {
            match board.get(p.coord) {
                None => return Err(MoveError::OutOfBounds(p.coord)),
                Some(Some(_)) => return Err(MoveError::CellOccupied(p.coord)),
                Some(None) => {}
            }
            if !p.tile.can_show(p.face) {
                return Err(MoveError::illegal(format!("tile {} cannot show '{}'", p.tile, p.face)));
            }
            if fresh.insert(p.coord, p.placed()).is_some() {
                return Err(MoveError::CellOccupied(p.coord));
            }
        }

        let axis = if placements.iter().all(|p| p.coord.row == first.coord.row) {
            Axis::Across
        } else if placements.iter().all(|p| p.coord.col == first.coord.col) {
            Axis::Down
        } else {
            return Err(MoveError::illegal("tiles must lie in a single row or column"));
        };

        let positions = placements.iter().map(|p| axis.position(p.coord));
        let (lo, hi) = positions.fold((usize::MAX, 0), |(lo, hi), k| (lo.min(k), hi.max(k)));
        for k in lo..=hi {
            let coord = axis.at(first.coord, k);
            if !fresh.contains_key(&coord) && matches!(board.get(coord), Some(None)) {
                return Err(MoveError::illegal("tiles must form one unbroken line"));
            }
        }

        if board.as_slice().iter().all(Option::is_none) {
            if !fresh.contains_key(&CENTER) {
                return Err(MoveError::illegal("the first word must cover the centre square"));
            }
        } else {
            let touches = fresh
                .keys()
                .any(|&c| neighbours(c).any(|n| matches!(board.get(n), Some(Some(_)))));
            if !touches {
                return Err(MoveError::illegal("tiles must touch a word already on the board"));
            }
        }

        let mut words = Vec::new();
        words.extend(word_through(board, bonuses, &fresh, first.coord, axis));
        for p in placements {
            words.extend(word_through(board, bonuses, &fresh, p.coord, axis.cross()));
        }
        if words.is_empty() {
            return Err(MoveError::illegal("a move must form a word of at least two letters"));
        }
        if let Some(list) = &self.words {
            if let Some((word, _)) = words.iter().find(|(w, _)| !list.contains(w)) {
                return Err(MoveError::illegal(format!("{word} is not in the word list")));
            }
        }

        let total = words.iter().map(|(_, score)| score).sum();
        Ok(ScoredPlay { words, total })
    }

    /// Every single-tile `Place` that could start or extend the pending move.
    fn place_moves(&self, state: &EruditeState) -> Vec<EruditeMove> {
        let anchors: Vec<Coord> = if state.is_board_empty() && state.pending_move.is_empty() {
            vec![CENTER]
        } else {
            Board::coords()
                .filter(|&c| state.is_free(c))
                .filter(|&c| neighbours(c).any(|n| state.tile_at(n).is_some() || state.is_pending(n)))
                .collect()
        };

        let mut tiles: Vec<Tile> = state.rack(state.current_player).to_vec();
        tiles.sort_unstable();
        tiles.dedup();

        let mut moves = Vec::new();
        for coord in anchors {
            for &tile in &tiles {
                match tile {
                    Tile::Letter(letter) => moves.push(EruditeMove::Place(Placement::letter(coord, letter))),
                    Tile::Blank => moves.extend(
                        ('A'..='Z').map(|face| EruditeMove::Place(Placement::blank(coord, face))),
                    ),
                }
            }
        }
        moves
    }
}

fn place_into(state: &mut EruditeState, placement: Placement) -> Result<(), MoveError> {
    let coord = placement.coord;
    match state.board.get(coord) {
        None => return Err(MoveError::OutOfBounds(coord)),
        Some(Some(_)) => return Err(MoveError::CellOccupied(coord)),
        Some(None) if state.is_pending(coord) => return Err(MoveError::CellOccupied(coord)),
        Some(None) => {}
    }
    if !is_letter(placement.face) || !placement.tile.can_show(placement.face) {
        return Err(MoveError::illegal(format!(
            "tile {} cannot show '{}'",
            placement.tile, placement.face
        )));
    }
    let side = state.current_player;
    let pos = state
        .rack(side)
        .iter()
        .position(|t| *t == placement.tile)
        .ok_or_else(|| MoveError::illegal(format!("tile {} is not on the rack", placement.tile)))?;
    state.rack_mut(side).remove(pos);
    state.pending_move.push(placement);
    Ok(())
}

/// The word through `start` along `axis`, if it has two or more letters.
fn word_through(
    board: &Board,
    bonuses: &Bonuses,
    fresh: &FxHashMap<Coord, Placed>,
    start: Coord,
    axis: Axis,
) -> Option<(String, u32)> {
    let tile_at = |c: Coord| fresh.get(&c).copied().or_else(|| board.get(c).copied().flatten());

    let mut begin = start;
    while let Some(prev) = axis.step(begin, -1).filter(|&c| tile_at(c).is_some()) {
        begin = prev;
    }

    let mut word = String::new();
    let mut sum = 0;
    let mut multiplier = 1;
    let mut cursor = Some(begin);
    while let Some(coord) = cursor {
        let Some(placed) = tile_at(coord) else {
            break;
        };
        word.push(placed.face);
        if fresh.contains_key(&coord) {
            let bonus = bonuses.get(coord).copied().unwrap_or_default();
            sum += placed.tile.value() * bonus.letter_multiplier();
            multiplier *= bonus.word_multiplier();
        } else {
            sum += placed.tile.value();
        }
        cursor = axis.step(coord, 1);
    }

    (word.len() >= 2).then(|| (word, sum * multiplier))
}

impl Rules for Erudite {
    type State = EruditeState;
    type Move = EruditeMove;

    fn new_game(&self, rng: &mut GameRng) -> EruditeState {
        self.start(rng)
    }

    fn side_to_move(&self, state: &EruditeState) -> Side {
        state.current_player
    }

    /// Single-tile actions only; `Play` covers too many combinations to list.
    fn legal_moves(&self, state: &EruditeState) -> Vec<EruditeMove> {
        if state.winner.is_some() {
            return Vec::new();
        }
        let mut moves = self.place_moves(state);
        moves.extend(state.pending_move.iter().map(|p| EruditeMove::Remove(p.coord)));
        if !state.pending_move.is_empty() {
            moves.push(EruditeMove::Clear);
            if self.evaluate(&state.board, &state.bonus_cells, &state.pending_move).is_ok() {
                moves.push(EruditeMove::Confirm);
            }
        }
        moves.push(EruditeMove::Pass);
        moves
    }

    fn apply_move(
        &self,
        state: &EruditeState,
        side: Side,
        mv: &EruditeMove,
        _rng: &mut GameRng,
    ) -> Result<EruditeState, MoveError> {
        match mv {
            EruditeMove::Place(placement) => self.place_tile(state, side, *placement),
            EruditeMove::Remove(coord) => self.remove_tile(state, side, *coord),
            EruditeMove::Clear => self.clear_move(state, side),
            EruditeMove::Confirm => self.confirm_move(state, side),
            EruditeMove::Play(placements) => self.play(state, side, placements),
            EruditeMove::Pass => self.pass(state, side),
        }
    }

    fn outcome(&self, state: &EruditeState) -> Option<Outcome> {
        state.winner
    }
}
