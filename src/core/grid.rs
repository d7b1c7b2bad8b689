//! Board primitives: coordinates, square grids, and owned cells.
//!
//! Boards never change size, so the edge length is a const parameter.
//! Cells are stored flat in row-major order and every access is
//! bounds-checked; an out-of-range coordinate is an error, never a panic.

use serde::{Deserialize, Serialize};

use super::error::{MoveError, StateError};
use super::player::Side;

/// A (row, column) position on a board. Row 0 is the top edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row index (0 = top).
    pub row: usize,
    /// Column index (0 = left).
    pub col: usize,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Coordinate of a row-major flat index on an `n`-wide board.
    #[must_use]
    pub const fn from_index(index: usize, n: usize) -> Self {
        Self {
            row: index / n,
            col: index % n,
        }
    }

    /// Row-major flat index on an `n`-wide board.
    #[must_use]
    pub const fn index(self, n: usize) -> usize {
        self.row * n + self.col
    }

    /// Whether this coordinate lies on an `n`×`n` board.
    #[must_use]
    pub const fn in_bounds(self, n: usize) -> bool {
        self.row < n && self.col < n
    }

    /// Step by `(dr, dc)`, staying on an `n`×`n` board.
    #[must_use]
    pub fn offset(self, dr: isize, dc: isize, n: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Self { row, col };
        next.in_bounds(n).then_some(next)
    }

    /// Dark squares are the ones with odd `row + col`.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Contents of a square on a board where pieces belong to a side.
///
/// `R` is the game's rank: a single mark in tic-tac-toe, man/king in checkers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell<R> {
    /// Nothing here.
    Empty,
    /// A piece of the given rank owned by a side.
    Occupied(Side, R),
}

impl<R> Cell<R> {
    /// Check if the square is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Owner of the piece on this square.
    #[must_use]
    pub fn owner(&self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(side, _) => Some(*side),
        }
    }

    /// Rank of the piece on this square.
    #[must_use]
    pub fn rank(&self) -> Option<&R> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(_, rank) => Some(rank),
        }
    }
}

impl<R> Default for Cell<R> {
    fn default() -> Self {
        Cell::Empty
    }
}

/// Fixed `N`×`N` board.
///
/// Serialized as a list of rows; decoding rejects any other shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Vec<T>>",
    into = "Vec<Vec<T>>",
    bound(serialize = "T: Serialize + Clone", deserialize = "T: Deserialize<'de>")
)]
pub struct Grid<T, const N: usize> {
    cells: Vec<T>,
}

impl<T: Clone, const N: usize> Grid<T, N> {
    /// Board with every square set to `value`.
    #[must_use]
    pub fn filled(value: T) -> Self {
        Self {
            cells: vec![value; N * N],
        }
    }
}

impl<T, const N: usize> Grid<T, N> {
    /// Edge length.
    pub const SIZE: usize = N;

    /// Get the square at `coord`, or `None` off the board.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&T> {
        if coord.in_bounds(N) {
            self.cells.get(coord.index(N))
        } else {
            None
        }
    }

    /// Mutable access to the square at `coord`.
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        if coord.in_bounds(N) {
            self.cells.get_mut(coord.index(N))
        } else {
            None
        }
    }

    /// Overwrite the square at `coord`.
    pub fn set(&mut self, coord: Coord, value: T) -> Result<(), MoveError> {
        let slot = self.get_mut(coord).ok_or(MoveError::OutOfBounds(coord))?;
        *slot = value;
        Ok(())
    }

    /// All coordinates in row-major order.
    pub fn coords() -> impl Iterator<Item = Coord> {
        (0..N * N).map(|i| Coord::from_index(i, N))
    }

    /// Iterate over `(coord, &square)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, v)| (Coord::from_index(i, N), v))
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(N)
    }

    /// All squares in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

impl<T, const N: usize> TryFrom<Vec<Vec<T>>> for Grid<T, N> {
    type Error = StateError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        if rows.len() != N || rows.iter().any(|row| row.len() != N) {
            return Err(StateError::Invalid(format!("board must be {N}x{N}")));
        }
        Ok(Self {
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

impl<T: Clone, const N: usize> From<Grid<T, N>> for Vec<Vec<T>> {
    fn from(grid: Grid<T, N>) -> Self {
        grid.cells.chunks(N).map(<[T]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_index_roundtrip() {
        let c = Coord::from_index(7, 3);
        assert_eq!(c, Coord::new(2, 1));
        assert_eq!(c.index(3), 7);
    }

    #[test]
    fn test_coord_offset_bounds() {
        let c = Coord::new(0, 0);
        assert_eq!(c.offset(1, 1, 8), Some(Coord::new(1, 1)));
        assert_eq!(c.offset(-1, 1, 8), None);
        assert_eq!(Coord::new(7, 7).offset(1, 0, 8), None);
    }

    #[test]
    fn test_coord_dark() {
        assert!(Coord::new(0, 1).is_dark());
        assert!(!Coord::new(0, 0).is_dark());
    }

    #[test]
    fn test_grid_get_set() {
        let mut grid: Grid<u32, 4> = Grid::filled(0);
        grid.set(Coord::new(1, 2), 8).unwrap();
        assert_eq!(grid.get(Coord::new(1, 2)), Some(&8));
        assert_eq!(grid.get(Coord::new(4, 0)), None);
        assert_eq!(
            grid.set(Coord::new(0, 4), 2),
            Err(MoveError::OutOfBounds(Coord::new(0, 4)))
        );
    }

    #[test]
    fn test_grid_serializes_as_rows() {
        let mut grid: Grid<u32, 2> = Grid::filled(0);
        grid.set(Coord::new(1, 0), 2).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, "[[0,0],[2,0]]");

        let back: Grid<u32, 2> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_grid_rejects_wrong_shape() {
        assert!(serde_json::from_str::<Grid<u32, 2>>("[[0,0],[0]]").is_err());
        assert!(serde_json::from_str::<Grid<u32, 2>>("[[0,0]]").is_err());
    }

    #[test]
    fn test_cell_accessors() {
        let cell: Cell<u8> = Cell::Occupied(Side::Opponent, 3);
        assert_eq!(cell.owner(), Some(Side::Opponent));
        assert_eq!(cell.rank(), Some(&3));
        assert!(Cell::<u8>::Empty.is_empty());
    }
}
