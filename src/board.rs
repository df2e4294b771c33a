use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, FromRepr};

/// One of the 64 board cells, indexed 0-63 from A1 to H8.
///
/// Index arithmetic encodes adjacency: `+8`/`-8` moves one rank up/down,
/// `+1`/`-1` one file right/left, and `+9`/`+7`/`-7`/`-9` are the four
/// diagonal steps. Plain arithmetic wraps to the neighboring rank at the
/// A- and H-files, so every horizontal or diagonal step must go through
/// [`Square::step`], which refuses to cross a file edge.
#[rustfmt::skip]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumString, FromRepr, Display, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    pub(crate) const fn rank(self) -> u8 {
        self as u8 / 8
    }

    pub(crate) const fn file(self) -> u8 {
        self as u8 % 8
    }

    /// True for the eight A-file squares.
    pub const fn is_left_edge(self) -> bool {
        self as u8 % 8 == 0
    }

    /// True for the eight H-file squares.
    pub const fn is_right_edge(self) -> bool {
        self as u8 % 8 == 7
    }

    /// `self + delta`, or `None` when the result leaves 0-63. Does not
    /// guard against file wraparound; callers that move horizontally or
    /// diagonally want [`Square::step`].
    pub fn offset(self, delta: i8) -> Option<Square> {
        let idx = self as i8 + delta;
        if (0..64).contains(&idx) {
            Square::from_repr(idx as u8)
        } else {
            None
        }
    }

    /// One step in `dir`, or `None` at the board edge. The shared
    /// advance-or-stop primitive under every sliding ray and leaping
    /// pattern.
    pub fn step(self, dir: Direction) -> Option<Square> {
        match dir.file_shift() {
            -1 if self.is_left_edge() => return None,
            1 if self.is_right_edge() => return None,
            _ => (),
        }
        self.offset(dir as i8)
    }

    /// Follows a sequence of steps, stopping at the first edge.
    pub(crate) fn walk(self, dirs: &[Direction]) -> Option<Square> {
        dirs.iter().try_fold(self, |sq, &dir| sq.step(dir))
    }
}

/// The eight compass steps, carrying their index delta.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North = 8,
    South = -8,
    East = 1,
    West = -1,
    NorthEast = 9,
    NorthWest = 7,
    SouthEast = -7,
    SouthWest = -9,
}

impl Direction {
    const fn file_shift(self) -> i8 {
        match self {
            Direction::East | Direction::NorthEast | Direction::SouthEast => 1,
            Direction::West | Direction::NorthWest | Direction::SouthWest => -1,
            Direction::North | Direction::South => 0,
        }
    }
}

/// A set of squares. Unordered, duplicate-free, `Copy`; every move query
/// returns one of these, computed fresh against the current position.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const fn empty() -> Self {
        SquareSet(0)
    }

    pub fn from_squares(squares: &[Square]) -> Self {
        SquareSet(squares.iter().fold(0, |set, sq| set | 1 << (*sq as u8)))
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1 << square as u64;
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1 << square as u64);
    }

    pub const fn contains(self, square: Square) -> bool {
        self.0 & 1 << square as u64 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn iter(self) -> Squares {
        Squares(self.0)
    }
}

/// Iterates a [`SquareSet`] in index order.
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Square::from_repr(idx)
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = Squares;

    fn into_iter(self) -> Squares {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::empty();
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }
}

impl BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SquareSet {
    type Output = SquareSet;

    fn bitand(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 & other.0)
    }
}

impl BitAndAssign for SquareSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Sub for SquareSet {
    type Output = SquareSet;

    fn sub(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 & !other.0)
    }
}

impl SubAssign for SquareSet {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 &= !rhs.0;
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(64 + 7);

        for rank in (0..8).rev() {
            for file in 0..8 {
                let square = Square::from_repr(rank * 8 + file).unwrap();
                let ch = if self.contains(square) { 'X' } else { '.' };
                board_str.push(ch);
            }
            if rank != 0 {
                board_str.push('\n');
            }
        }

        write!(f, "{}", board_str)
    }
}
