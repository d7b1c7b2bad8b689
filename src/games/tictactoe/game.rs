//! Tic-tac-toe rules.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::{Cell, Coord, GameRng, Grid, Move, MoveError, Outcome, Side, StateError};
use crate::rules::Rules;

/// Board edge length.
pub const SIZE: usize = 3;

/// The single kind of tic-tac-toe mark. Who made it is the cell's owner:
/// the player plays X, the opponent plays O.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark;

/// A tic-tac-toe square.
pub type Square = Cell<Mark>;

/// The 3x3 board.
pub type Board = Grid<Square, SIZE>;

/// Flat indices of the 8 winning lines: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Complete tic-tac-toe state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TicTacToeState {
    board: Board,
    current_player: Side,
    winner: Option<Outcome>,
}

impl TicTacToeState {
    /// Empty board, player (X) to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Grid::filled(Cell::Empty),
            current_player: Side::Player,
            winner: None,
        }
    }

    /// Build a state from a board position, deriving the verdict.
    #[must_use]
    pub fn from_board(board: Board, current_player: Side) -> Self {
        let winner = verdict(&board);
        Self {
            board,
            current_player,
            winner,
        }
    }

    /// Build a state from flat owners in row-major order.
    #[must_use]
    pub fn from_owners(owners: [Option<Side>; 9], current_player: Side) -> Self {
        let mut board: Board = Grid::filled(Cell::Empty);
        for (i, owner) in owners.into_iter().enumerate() {
            if let (Some(side), Some(square)) = (owner, board.get_mut(Coord::from_index(i, SIZE))) {
                *square = Cell::Occupied(side, Mark);
            }
        }
        Self::from_board(board, current_player)
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

    /// Owners of the nine squares in row-major order.
    #[must_use]
    pub fn owners(&self) -> [Option<Side>; 9] {
        let mut out = [None; 9];
        for (slot, square) in out.iter_mut().zip(self.board.as_slice()) {
            *slot = square.owner();
        }
        out
    }

    /// Check that a decoded state could have arisen from play.
    pub fn validate(&self) -> Result<(), StateError> {
        let owners = self.owners();
        let xs = owners.iter().filter(|o| **o == Some(Side::Player)).count();
        let os = owners.iter().filter(|o| **o == Some(Side::Opponent)).count();
        if xs < os || xs > os + 1 {
            return Err(StateError::invalid(format!(
                "tic-tac-toe mark counts {xs} X / {os} O are unreachable"
            )));
        }
        if self.winner != verdict(&self.board) {
            return Err(StateError::invalid("tic-tac-toe winner does not match the board"));
        }
        // A finished game keeps the side that made the last mark
        let last_mover = if xs > os { Side::Player } else { Side::Opponent };
        let expected = if self.winner.is_some() { last_mover } else { last_mover.other() };
        if self.current_player != expected {
            return Err(StateError::invalid(format!(
                "tic-tac-toe with {xs} X / {os} O cannot have {} to move",
                self.current_player
            )));
        }
        Ok(())
    }

    /// Human-readable board, X for the player and O for the opponent.
    #[must_use]
    pub fn display(&self) -> String {
        self.board
            .rows()
            .map(|row| {
                row.iter()
                    .map(|square| match square.owner() {
                        Some(Side::Player) => "X",
                        Some(Side::Opponent) => "O",
                        None => ".",
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner of a complete line on `owners`, if any.
#[must_use]
pub fn line_winner(owners: &[Option<Side>; 9]) -> Option<Side> {
    LINES.iter().find_map(|&[a, b, c]| match owners[a] {
        Some(side) if owners[b] == Some(side) && owners[c] == Some(side) => Some(side),
        _ => None,
    })
}

fn verdict(board: &Board) -> Option<Outcome> {
    let mut owners = [None; 9];
    for (slot, square) in owners.iter_mut().zip(board.as_slice()) {
        *slot = square.owner();
    }
    if let Some(side) = line_winner(&owners) {
        return Some(Outcome::for_winner(side));
    }
    owners.iter().all(Option::is_some).then_some(Outcome::Draw)
}

/// Tic-tac-toe engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Every empty square, in row-major order.
    #[must_use]
    pub fn empty_cells(&self, state: &TicTacToeState) -> Vec<Coord> {
        if state.winner.is_some() {
            return Vec::new();
        }
        state
            .board
            .iter()
            .filter(|(_, square)| square.is_empty())
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Place `side`'s mark at `coord`.
    ///
    /// # Errors
    ///
    /// `GameAlreadyOver`, `NotCurrentPlayersTurn`, `OutOfBounds`, or
    /// `CellOccupied`.
    #[instrument(skip(self, state), fields(player = %side))]
    pub fn place(
        &self,
        state: &TicTacToeState,
        side: Side,
        coord: Coord,
    ) -> Result<TicTacToeState, MoveError> {
        self.check_turn(state, side)?;

        let square = state.board.get(coord).ok_or(MoveError::OutOfBounds(coord))?;
        if !square.is_empty() {
            return Err(MoveError::CellOccupied(coord));
        }

        let mut next = state.clone();
        next.board.set(coord, Cell::Occupied(side, Mark))?;
        next.winner = verdict(&next.board);
        if next.winner.is_none() {
            next.current_player = side.other();
        }

        debug!(%coord, winner = ?next.winner, "mark placed");
        Ok(next)
    }
}

impl Rules for TicTacToe {
    type State = TicTacToeState;
    type Move = Move;

    fn new_game(&self, _rng: &mut GameRng) -> TicTacToeState {
        TicTacToeState::new()
    }

    fn side_to_move(&self, state: &TicTacToeState) -> Side {
        state.current_player
    }

    fn legal_moves(&self, state: &TicTacToeState) -> Vec<Move> {
        self.empty_cells(state).into_iter().map(Move::place).collect()
    }

    fn apply_move(
        &self,
        state: &TicTacToeState,
        side: Side,
        mv: &Move,
        _rng: &mut GameRng,
    ) -> Result<TicTacToeState, MoveError> {
        if mv.from.is_some() || mv.capture.is_some() {
            return Err(MoveError::illegal("tic-tac-toe marks are placed, not moved"));
        }
        self.place(state, side, mv.to)
    }

    fn outcome(&self, state: &TicTacToeState) -> Option<Outcome> {
        state.winner
    }
}
