//! Checkers rules: diagonal steps, mandatory jumps, capture chains, kinging.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::core::{Cell, Coord, GameRng, Grid, Move, MoveError, Outcome, Side, StateError};
use crate::rules::Rules;

/// Board edge length.
pub const SIZE: usize = 8;

/// Rows of men each side starts with.
const STARTING_ROWS: usize = 3;

/// Piece rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Moves and captures forward only.
    Man,
    /// Moves and captures in all four diagonal directions.
    King,
}

/// A checkers square.
pub type Square = Cell<Rank>;

/// The 8x8 board.
pub type Board = Grid<Square, SIZE>;

/// Row delta pointing toward the other side's back rank.
#[must_use]
pub const fn forward(side: Side) -> isize {
    match side {
        Side::Player => -1,
        Side::Opponent => 1,
    }
}

/// Row on which `side`'s men are crowned.
#[must_use]
pub const fn crowning_row(side: Side) -> usize {
    match side {
        Side::Player => 0,
        Side::Opponent => SIZE - 1,
    }
}

/// Complete checkers state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckersState {
    board: Board,
    current_player: Side,
    winner: Option<Outcome>,
    must_continue_capture_from: Option<Coord>,
}

impl CheckersState {
    /// Standard opening: twelve men each on the dark squares of the first
    /// three rows; the opponent at the top, the player at the bottom.
    #[must_use]
    pub fn new() -> Self {
        let mut board: Board = Grid::filled(Cell::Empty);
        for coord in Board::coords().filter(|c| c.is_dark()) {
            let owner = if coord.row < STARTING_ROWS {
                Some(Side::Opponent)
            } else if coord.row >= SIZE - STARTING_ROWS {
                Some(Side::Player)
            } else {
                None
            };
            if let (Some(side), Some(square)) = (owner, board.get_mut(coord)) {
                *square = Cell::Occupied(side, Rank::Man);
            }
        }
        Self {
            board,
            current_player: Side::Player,
            winner: None,
            must_continue_capture_from: None,
        }
    }

    /// Arbitrary position, checked for dark-square placement.
    ///
    /// The verdict is derived: if the side to move has nothing to play,
    /// the state is already finished.
    pub fn from_pieces(
        pieces: &[(Coord, Side, Rank)],
        current_player: Side,
    ) -> Result<Self, StateError> {
        let mut board: Board = Grid::filled(Cell::Empty);
        for &(coord, side, rank) in pieces {
            let square = board
                .get_mut(coord)
                .ok_or_else(|| StateError::invalid(format!("piece off the board at {coord}")))?;
            *square = Cell::Occupied(side, rank);
        }
        let mut state = Self {
            board,
            current_player,
            winner: None,
            must_continue_capture_from: None,
        };
        state.winner = terminal_verdict(&state);
        state.validate()?;
        Ok(state)
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
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

    /// Square of the piece that must keep capturing, if a chain is pending.
    #[must_use]
    pub fn must_continue_capture_from(&self) -> Option<Coord> {
        self.must_continue_capture_from
    }

    /// Square contents, `Empty` off the board.
    #[must_use]
    pub fn square(&self, coord: Coord) -> Square {
        self.board.get(coord).copied().unwrap_or(Cell::Empty)
    }

    /// Number of pieces `side` has left.
    #[must_use]
    pub fn piece_count(&self, side: Side) -> usize {
        self.board
            .as_slice()
            .iter()
            .filter(|square| square.owner() == Some(side))
            .count()
    }

    /// Check that a decoded state could have arisen from play.
    pub fn validate(&self) -> Result<(), StateError> {
        for (coord, square) in self.board.iter() {
            let Cell::Occupied(side, rank) = *square else {
                continue;
            };
            if !coord.is_dark() {
                return Err(StateError::invalid(format!("checkers piece on light square {coord}")));
            }
            if rank == Rank::Man && coord.row == crowning_row(side) {
                return Err(StateError::invalid(format!("uncrowned man on back rank at {coord}")));
            }
        }
        for side in Side::BOTH {
            if self.piece_count(side) > 12 {
                return Err(StateError::invalid(format!("{side} has more than 12 pieces")));
            }
        }
        if let Some(from) = self.must_continue_capture_from {
            let owned = self.square(from).owner() == Some(self.current_player);
            if !owned || captures_from(&self.board, from).is_empty() {
                return Err(StateError::invalid(format!("no capture can continue from {from}")));
            }
        }
        if self.winner != terminal_verdict(self) {
            return Err(StateError::invalid("checkers winner does not match the board"));
        }
        Ok(())
    }

    /// Human-readable board: `w`/`W` player man/king, `b`/`B` opponent.
    #[must_use]
    pub fn display(&self) -> String {
        self.board
            .rows()
            .map(|row| {
                row.iter()
                    .map(|square| match square {
                        Cell::Empty => '.',
                        Cell::Occupied(Side::Player, Rank::Man) => 'w',
                        Cell::Occupied(Side::Player, Rank::King) => 'W',
                        Cell::Occupied(Side::Opponent, Rank::Man) => 'b',
                        Cell::Occupied(Side::Opponent, Rank::King) => 'B',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for CheckersState {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagonal directions a piece may travel in.
fn directions(side: Side, rank: Rank) -> SmallVec<[(isize, isize); 4]> {
    let fwd = forward(side);
    match rank {
        Rank::Man => SmallVec::from_slice(&[(fwd, -1), (fwd, 1)]),
        Rank::King => SmallVec::from_slice(&[(-1, -1), (-1, 1), (1, -1), (1, 1)]),
    }
}

/// Jumps available to the piece on `from`.
fn captures_from(board: &Board, from: Coord) -> Vec<Move> {
    let Some(&Cell::Occupied(side, rank)) = board.get(from) else {
        return Vec::new();
    };
    directions(side, rank)
        .into_iter()
        .filter_map(|(dr, dc)| {
            let over = from.offset(dr, dc, SIZE)?;
            let to = over.offset(dr, dc, SIZE)?;
            let enemy = board.get(over)?.owner() == Some(side.other());
            let landing = board.get(to)?.is_empty();
            (enemy && landing).then(|| Move::jump(from, over, to))
        })
        .collect()
}

/// Single-square steps available to the piece on `from`.
fn steps_from(board: &Board, from: Coord) -> Vec<Move> {
    let Some(&Cell::Occupied(side, rank)) = board.get(from) else {
        return Vec::new();
    };
    directions(side, rank)
        .into_iter()
        .filter_map(|(dr, dc)| {
            let to = from.offset(dr, dc, SIZE)?;
            board.get(to)?.is_empty().then(|| Move::step(from, to))
        })
        .collect()
}

/// Legal moves for `side`, honouring mandatory capture and pending chains.
fn moves_for(state: &CheckersState, side: Side) -> Vec<Move> {
    if state.winner.is_some() {
        return Vec::new();
    }
    if side == state.current_player {
        if let Some(from) = state.must_continue_capture_from {
            return captures_from(&state.board, from);
        }
    }

    let own: Vec<Coord> = state
        .board
        .iter()
        .filter(|(_, square)| square.owner() == Some(side))
        .map(|(coord, _)| coord)
        .collect();

    let captures: Vec<Move> = own.iter().flat_map(|&c| captures_from(&state.board, c)).collect();
    if !captures.is_empty() {
        return captures;
    }
    own.iter().flat_map(|&c| steps_from(&state.board, c)).collect()
}

/// The side to move loses with no pieces or no legal moves.
fn terminal_verdict(state: &CheckersState) -> Option<Outcome> {
    let side = state.current_player;
    if state.piece_count(side) == 0 || moves_for(state, side).is_empty() {
        Some(Outcome::for_winner(side.other()))
    } else {
        None
    }
}

/// Checkers engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Checkers;

impl Checkers {
    /// Every legal move for `side`.
    ///
    /// When any capture exists only captures are returned. While `side` has
    /// a chain pending, only jumps by the chaining piece are returned.
    #[must_use]
    pub fn legal_moves_for(&self, state: &CheckersState, side: Side) -> Vec<Move> {
        moves_for(state, side)
    }

    /// Apply `mv` for `side`.
    ///
    /// # Errors
    ///
    /// `GameAlreadyOver`; `NotCurrentPlayersTurn` for the wrong side or for a
    /// different piece while a chain is pending; `IllegalMove` for anything
    /// not in `legal_moves_for`.
    #[instrument(skip(self, state, mv), fields(player = %side, mv = %mv))]
    pub fn play(&self, state: &CheckersState, side: Side, mv: &Move) -> Result<CheckersState, MoveError> {
        self.check_turn(state, side)?;

        if let Some(chain) = state.must_continue_capture_from {
            if mv.from != Some(chain) {
                return Err(MoveError::NotCurrentPlayersTurn(side));
            }
        }
        if !moves_for(state, side).contains(mv) {
            return Err(MoveError::illegal(format!("{mv} is not a legal checkers move")));
        }
        let Some(from) = mv.from else {
            return Err(MoveError::illegal("checkers moves need an origin"));
        };
        let Some(&Cell::Occupied(owner, rank)) = state.board.get(from) else {
            return Err(MoveError::illegal(format!("no piece on {from}")));
        };

        let mut next = state.clone();
        next.board.set(from, Cell::Empty)?;
        if let Some(over) = mv.capture {
            next.board.set(over, Cell::Empty)?;
        }
        let crowned = rank == Rank::Man && mv.to.row == crowning_row(owner);
        let rank = if crowned { Rank::King } else { rank };
        next.board.set(mv.to, Cell::Occupied(owner, rank))?;

        let chain_continues = mv.is_capture() && !captures_from(&next.board, mv.to).is_empty();
        if chain_continues {
            next.must_continue_capture_from = Some(mv.to);
        } else {
            next.must_continue_capture_from = None;
            next.current_player = side.other();
        }
        next.winner = terminal_verdict(&next);

        debug!(crowned, chain_continues, winner = ?next.winner, "checkers move applied");
        Ok(next)
    }
}

impl Rules for Checkers {
    type State = CheckersState;
    type Move = Move;

    fn new_game(&self, _rng: &mut GameRng) -> CheckersState {
        CheckersState::new()
    }

    fn side_to_move(&self, state: &CheckersState) -> Side {
        state.current_player
    }

    fn legal_moves(&self, state: &CheckersState) -> Vec<Move> {
        moves_for(state, state.current_player)
    }

    fn apply_move(
        &self,
        state: &CheckersState,
        side: Side,
        mv: &Move,
        _rng: &mut GameRng,
    ) -> Result<CheckersState, MoveError> {
        self.play(state, side, mv)
    }

    fn outcome(&self, state: &CheckersState) -> Option<Outcome> {
        state.winner
    }

    fn must_continue(&self, state: &CheckersState) -> bool {
        state.must_continue_capture_from.is_some()
    }
}
