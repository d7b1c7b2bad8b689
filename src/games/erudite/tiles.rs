//! Tile set and premium-square layout.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Grid};

/// Board edge length.
pub const SIZE: usize = 15;

/// Tiles a rack holds when full.
pub const RACK_SIZE: usize = 7;

/// Tiles in a complete set.
pub const TOTAL_TILES: usize = 100;

/// Blank tiles in a complete set.
pub const BLANKS: usize = 2;

/// The centre square; the first word must cover it.
pub const CENTER: Coord = Coord::new(7, 7);

/// `(letter, count, value)` for the 98 lettered tiles.
pub const DISTRIBUTION: [(char, usize, u32); 26] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
];

/// A tile in the bag or on a rack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tile {
    /// A lettered tile.
    Letter(char),
    /// A joker; takes any letter when played and scores nothing.
    Blank,
}

impl Tile {
    /// Points the tile is worth.
    #[must_use]
    pub fn value(self) -> u32 {
        match self {
            Tile::Letter(letter) => letter_value(letter),
            Tile::Blank => 0,
        }
    }

    /// Whether this tile may be shown as `face` on the board.
    #[must_use]
    pub fn can_show(self, face: char) -> bool {
        match self {
            Tile::Letter(letter) => letter == face,
            Tile::Blank => is_letter(face),
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tile::Letter(letter) => write!(f, "{letter}"),
            Tile::Blank => write!(f, "?"),
        }
    }
}

/// A tile lying on the board, with the letter it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Placed {
    /// The physical tile.
    pub tile: Tile,
    /// The letter it reads as (a blank's chosen letter).
    pub face: char,
}

/// One tile put on one square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Placement {
    /// Target square.
    pub coord: Coord,
    /// Tile taken from the rack.
    pub tile: Tile,
    /// Letter it reads as.
    pub face: char,
}

impl Placement {
    /// Place a lettered tile.
    #[must_use]
    pub fn letter(coord: Coord, letter: char) -> Self {
        Self {
            coord,
            tile: Tile::Letter(letter),
            face: letter,
        }
    }

    /// Place a blank showing `face`.
    #[must_use]
    pub fn blank(coord: Coord, face: char) -> Self {
        Self {
            coord,
            tile: Tile::Blank,
            face,
        }
    }

    /// What ends up on the square.
    #[must_use]
    pub fn placed(&self) -> Placed {
        Placed {
            tile: self.tile,
            face: self.face,
        }
    }
}

/// Premium applied to a tile newly placed on a square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bonus {
    #[default]
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Bonus {
    /// Multiplier on the tile's own value.
    #[must_use]
    pub fn letter_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleLetter => 2,
            Bonus::TripleLetter => 3,
            _ => 1,
        }
    }

    /// Multiplier on the whole word.
    #[must_use]
    pub fn word_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleWord => 2,
            Bonus::TripleWord => 3,
            _ => 1,
        }
    }
}

/// Whether `c` is one of the 26 upper-case letters.
#[must_use]
pub fn is_letter(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// Face value of a letter; 0 for anything that isn't one.
#[must_use]
pub fn letter_value(letter: char) -> u32 {
    DISTRIBUTION
        .iter()
        .find(|(l, _, _)| *l == letter)
        .map_or(0, |&(_, _, value)| value)
}

/// The complete tile set in a fixed order (A..Z, then blanks).
#[must_use]
pub fn full_set() -> Vec<Tile> {
    DISTRIBUTION
        .iter()
        .flat_map(|&(letter, count, _)| std::iter::repeat(Tile::Letter(letter)).take(count))
        .chain(std::iter::repeat(Tile::Blank).take(BLANKS))
        .collect()
}

/// The standard premium layout.
///
/// Defined on the top-left quadrant and mirrored to the other three.
#[must_use]
pub fn standard_layout() -> Grid<Bonus, SIZE> {
    const QUADRANT: [(usize, usize, Bonus); 18] = [
        (0, 0, Bonus::TripleWord),
        (0, 7, Bonus::TripleWord),
        (7, 0, Bonus::TripleWord),
        (1, 1, Bonus::DoubleWord),
        (2, 2, Bonus::DoubleWord),
        (3, 3, Bonus::DoubleWord),
        (4, 4, Bonus::DoubleWord),
        (7, 7, Bonus::DoubleWord),
        (1, 5, Bonus::TripleLetter),
        (5, 1, Bonus::TripleLetter),
        (5, 5, Bonus::TripleLetter),
        (0, 3, Bonus::DoubleLetter),
        (2, 6, Bonus::DoubleLetter),
        (3, 0, Bonus::DoubleLetter),
        (3, 7, Bonus::DoubleLetter),
        (6, 2, Bonus::DoubleLetter),
        (6, 6, Bonus::DoubleLetter),
        (7, 3, Bonus::DoubleLetter),
    ];

    let last = SIZE - 1;
    let mut layout = Grid::filled(Bonus::None);
    for (row, col, bonus) in QUADRANT {
        for (r, c) in [(row, col), (row, last - col), (last - row, col), (last - row, last - col)] {
            if let Some(square) = layout.get_mut(Coord::new(r, c)) {
                *square = bonus;
            }
        }
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_set_size() {
        let set = full_set();
        assert_eq!(set.len(), TOTAL_TILES);
        assert_eq!(set.iter().filter(|t| **t == Tile::Blank).count(), BLANKS);
        assert_eq!(set.iter().filter(|t| **t == Tile::Letter('E')).count(), 12);
    }

    #[test]
    fn test_values() {
        assert_eq!(Tile::Letter('Q').value(), 10);
        assert_eq!(Tile::Letter('A').value(), 1);
        assert_eq!(Tile::Blank.value(), 0);
        assert_eq!(letter_value('?'), 0);
    }

    #[test]
    fn test_can_show() {
        assert!(Tile::Letter('A').can_show('A'));
        assert!(!Tile::Letter('A').can_show('B'));
        assert!(Tile::Blank.can_show('Z'));
        assert!(!Tile::Blank.can_show('z'));
    }

    #[test]
    fn test_layout() {
        let layout = standard_layout();
        let count = |b: Bonus| layout.as_slice().iter().filter(|&&x| x == b).count();
        assert_eq!(count(Bonus::TripleWord), 8);
        assert_eq!(count(Bonus::DoubleWord), 17);
        assert_eq!(count(Bonus::TripleLetter), 12);
        assert_eq!(count(Bonus::DoubleLetter), 24);
        assert_eq!(layout.get(CENTER), Some(&Bonus::DoubleWord));
        assert_eq!(layout.get(Coord::new(14, 11)), Some(&Bonus::DoubleLetter));
    }
}
