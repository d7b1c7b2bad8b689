//! 2048 rules: slide, merge once per move, spawn one tile.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::{Coord, GameRng, Grid, MoveError, Outcome, Side, StateError};
use crate::rules::Rules;

/// Board edge length.
pub const SIZE: usize = 4;

/// Tile value that marks the goal.
pub const GOAL: u32 = 2048;

/// Largest tile a 4x4 board can build from spawned 2s and 4s.
pub const MAX_TILE: u32 = 1 << 17;

/// Probability a spawned tile is a 4 rather than a 2.
const FOUR_PROBABILITY: f64 = 0.1;

/// The 4x4 board; 0 is an empty cell.
pub type Board = Grid<u32, SIZE>;

/// Slide direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Coordinates of line `i`, ordered from the edge tiles slide toward.
    fn line(self, i: usize) -> [Coord; SIZE] {
        std::array::from_fn(|k| match self {
            Direction::Left => Coord::new(i, k),
            Direction::Right => Coord::new(i, SIZE - 1 - k),
            Direction::Up => Coord::new(k, i),
            Direction::Down => Coord::new(SIZE - 1 - k, i),
        })
    }
}

/// Complete 2048 state. Single-player: there is no side to move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Game2048State {
    board: Board,
    score: u32,
    reached_2048: bool,
    winner: Option<Outcome>,
}

impl Game2048State {
    /// Position with the given rows and score; flags are derived.
    ///
    /// Fails if any tile is neither 0 nor a power of two.
    pub fn from_rows(rows: [[u32; SIZE]; SIZE], score: u32) -> Result<Self, StateError> {
        let board = Board::try_from(rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>())?;
        let mut state = Self {
            reached_2048: board.as_slice().iter().any(|&v| v >= GOAL),
            winner: None,
            board,
            score,
        };
        state.winner = verdict(&state);
        state.validate()?;
        Ok(state)
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Rows as plain arrays.
    #[must_use]
    pub fn rows(&self) -> [[u32; SIZE]; SIZE] {
        std::array::from_fn(|r| std::array::from_fn(|c| self.tile(Coord::new(r, c))))
    }

    /// Tile at `coord`, 0 if empty or off the board.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> u32 {
        self.board.get(coord).copied().unwrap_or(0)
    }

    /// Points earned from merges so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether a 2048 tile has ever appeared. Stays set.
    #[must_use]
    pub fn reached_2048(&self) -> bool {
        self.reached_2048
    }

    /// Final result, once set.
    #[must_use]
    pub fn winner(&self) -> Option<Outcome> {
        self.winner
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.board.as_slice().iter().map(|&v| u64::from(v)).sum()
    }

    /// Check that a decoded state could have arisen from play.
    pub fn validate(&self) -> Result<(), StateError> {
        if let Some((coord, value)) = self
            .board
            .iter()
            .find(|(_, &v)| v != 0 && (v == 1 || v > MAX_TILE || !v.is_power_of_two()))
        {
            return Err(StateError::invalid(format!("2048 tile {value} at {coord}")));
        }
        if !self.reached_2048 && self.board.as_slice().iter().any(|&v| v >= GOAL) {
            return Err(StateError::invalid("2048 tile present but reached_2048 unset"));
        }
        if self.winner.is_some() != is_game_over(&self.board) {
            return Err(StateError::invalid("2048 winner does not match the board"));
        }
        Ok(())
    }
}

/// Compress and merge one line toward index 0.
///
/// Returns the new line and the points gained. A merged tile does not merge
/// again in the same move.
#[must_use]
pub fn slide_line(line: [u32; SIZE]) -> ([u32; SIZE], u32) {
    let tiles: Vec<u32> = line.into_iter().filter(|&v| v != 0).collect();
    let mut out = [0; SIZE];
    let mut gained: u32 = 0;
    let mut write = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let merged = tiles[i].saturating_mul(2);
            out[write] = merged;
            gained = gained.saturating_add(merged);
            i += 2;
        } else {
            out[write] = tiles[i];
            i += 1;
        }
        write += 1;
    }
    (out, gained)
}

/// Slide the whole board; returns the new board and points gained.
#[must_use]
pub fn shift(board: &Board, direction: Direction) -> (Board, u32) {
    let mut next = board.clone();
    let mut gained: u32 = 0;
    for i in 0..SIZE {
        let coords = direction.line(i);
        let line = coords.map(|c| board.get(c).copied().unwrap_or(0));
        let (slid, points) = slide_line(line);
        gained = gained.saturating_add(points);
        for (coord, value) in coords.into_iter().zip(slid) {
            if let Some(cell) = next.get_mut(coord) {
                *cell = value;
            }
        }
    }
    (next, gained)
}

/// No empty cell and no equal neighbours anywhere.
#[must_use]
pub fn is_game_over(board: &Board) -> bool {
    board.iter().all(|(coord, &value)| {
        if value == 0 {
            return false;
        }
        let right = coord.offset(0, 1, SIZE).and_then(|c| board.get(c)).copied();
        let down = coord.offset(1, 0, SIZE).and_then(|c| board.get(c)).copied();
        right != Some(value) && down != Some(value)
    })
}

fn verdict(state: &Game2048State) -> Option<Outcome> {
    is_game_over(&state.board).then_some(if state.reached_2048 {
        Outcome::PlayerWin
    } else {
        Outcome::OpponentWin
    })
}

/// Put a 2 (90%) or 4 (10%) on a uniformly random empty cell.
fn spawn(board: &mut Board, rng: &mut GameRng) -> Option<(Coord, u32)> {
    let empty: Vec<Coord> = board
        .iter()
        .filter(|(_, &v)| v == 0)
        .map(|(c, _)| c)
        .collect();
    let &coord = rng.choose(&empty)?;
    let value = if rng.gen_bool(FOUR_PROBABILITY) { 4 } else { 2 };
    *board.get_mut(coord)? = value;
    Some((coord, value))
}

/// 2048 engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Game2048;

impl Game2048 {
    /// Empty board with two spawned tiles.
    #[must_use]
    pub fn start(&self, rng: &mut GameRng) -> Game2048State {
        let mut board = Grid::filled(0);
        spawn(&mut board, rng);
        spawn(&mut board, rng);
        Game2048State {
            board,
            score: 0,
            reached_2048: false,
            winner: None,
        }
    }

    /// Directions that would change the board.
    #[must_use]
    pub fn moving_directions(&self, state: &Game2048State) -> Vec<Direction> {
        if state.winner.is_some() {
            return Vec::new();
        }
        Direction::ALL
            .into_iter()
            .filter(|&d| shift(&state.board, d).0 != state.board)
            .collect()
    }

    /// Slide the board.
    ///
    /// A direction that moves nothing is a no-op: no spawn, no score.
    ///
    /// # Errors
    ///
    /// `GameAlreadyOver` once the board is stuck.
    #[instrument(skip(self, state, rng))]
    pub fn slide(
        &self,
        state: &Game2048State,
        direction: Direction,
        rng: &mut GameRng,
    ) -> Result<Game2048State, MoveError> {
        if state.winner.is_some() {
            return Err(MoveError::GameAlreadyOver);
        }

        let (mut board, gained) = shift(&state.board, direction);
        if board == state.board {
            debug!("nothing moved");
            return Ok(state.clone());
        }
        let spawned = spawn(&mut board, rng);

        let mut next = Game2048State {
            reached_2048: state.reached_2048 || board.as_slice().iter().any(|&v| v >= GOAL),
            board,
            score: state.score.saturating_add(gained),
            winner: None,
        };
        next.winner = verdict(&next);

        debug!(gained, ?spawned, score = next.score, winner = ?next.winner, "board slid");
        Ok(next)
    }
}

impl Rules for Game2048 {
    type State = Game2048State;
    type Move = Direction;

    fn new_game(&self, rng: &mut GameRng) -> Game2048State {
        self.start(rng)
    }

    fn side_to_move(&self, _state: &Game2048State) -> Side {
        Side::Player
    }

    fn legal_moves(&self, state: &Game2048State) -> Vec<Direction> {
        self.moving_directions(state)
    }

    fn apply_move(
        &self,
        state: &Game2048State,
        side: Side,
        mv: &Direction,
        rng: &mut GameRng,
    ) -> Result<Game2048State, MoveError> {
        self.check_turn(state, side)?;
        self.slide(state, *mv, rng)
    }

    fn outcome(&self, state: &Game2048State) -> Option<Outcome> {
        state.winner
    }
}
