// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Add, BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

use super::material::Color;

use Color::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("Invalid square coordinate: {0}")]
    InvalidCoord(String),
}

/// A square on the 8-by-8 board. Squares are ordered by rank first
/// (`A1`, `B1`, .. `H1`, `A2`, ..) so that the index of a square is
/// `rank * 8 + file` using 0-based file and rank.
#[rustfmt::skip]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
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
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::from_index(rank.to_index() * 8 + file.to_index())
    }

    #[rustfmt::skip]
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        use Square::*;
        const VALUES: [Square; 64] = [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ];
        debug_assert!(index < 64);
        VALUES[index]
    }

    /// Converts a 0-based (file, rank) pair. Anything off the board
    /// yields `None`.
    #[inline]
    pub fn from_coords(file: isize, rank: isize) -> Option<Self> {
        let file = File::try_from_index(usize::try_from(file).ok()?)?;
        let rank = Rank::try_from_index(usize::try_from(rank).ok()?)?;
        Some(Self::new(file, rank))
    }

    #[inline]
    pub fn try_from_chars(f: char, r: char) -> Option<Self> {
        let file = File::try_from_char(f)?;
        let rank = Rank::try_from_char(r)?;
        Some(Self::new(file, rank))
    }

    #[inline]
    pub const fn coords(&self) -> (usize, usize) {
        (self.file_index(), self.rank_index())
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(0x1 << self.to_index())
    }
    #[inline]
    pub const fn file_index(&self) -> usize {
        self.to_index() % 8
    }
    #[inline]
    pub const fn rank_index(&self) -> usize {
        self.to_index() / 8
    }
    #[inline]
    pub const fn file(&self) -> File {
        File::from_index(self.file_index())
    }
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.rank_index())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidCoord(s.to_string());
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        Self::try_from_chars(f, r).ok_or_else(invalid)
    }
}

impl TryFrom<(isize, isize)> for Square {
    type Error = SquareError;

    fn try_from((file, rank): (isize, isize)) -> Result<Self, Self::Error> {
        Self::from_coords(file, rank)
            .ok_or_else(|| SquareError::InvalidCoord(format!("({}, {})", file, rank)))
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.to_index()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum File {
    FileA,
    FileB,
    FileC,
    FileD,
    FileE,
    FileF,
    FileG,
    FileH,
}

use File::{FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH};

impl File {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [File; 8] = [FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_index(index: usize) -> Option<Self> {
        if index < 8 {
            Some(Self::from_index(index))
        } else {
            None
        }
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            'a' | 'A' => Some(FileA),
            'b' | 'B' => Some(FileB),
            'c' | 'C' => Some(FileC),
            'd' | 'D' => Some(FileD),
            'e' | 'E' => Some(FileE),
            'f' | 'F' => Some(FileF),
            'g' | 'G' => Some(FileG),
            'h' | 'H' => Some(FileH),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_char(&self) -> char {
        const VALUES: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
        VALUES[self.to_index()]
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Add<isize> for File {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        Self::try_from_index(self.to_index().checked_add_signed(rhs)?)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Rank1,
    Rank2,
    Rank3,
    Rank4,
    Rank5,
    Rank6,
    Rank7,
    Rank8,
}

use Rank::{Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8};

impl Rank {
    #[inline]
    pub fn is_back_rank(&self, color: Color) -> bool {
        Self::back_rank(color) == *self
    }

    /// The rank a color's king starts on. A pawn promotes on reaching
    /// the opponent's back rank.
    #[inline]
    pub const fn back_rank(color: Color) -> Self {
        match color {
            White => Rank1,
            Black => Rank8,
        }
    }

    /// The rank from which a color's pawns may advance two squares.
    #[inline]
    pub const fn pawn_rank(color: Color) -> Self {
        match color {
            White => Rank2,
            Black => Rank7,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Rank; 8] = [Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_index(index: usize) -> Option<Self> {
        if index < 8 {
            Some(Self::from_index(index))
        } else {
            None
        }
    }
    #[inline]
    pub fn try_from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank1),
            '2' => Some(Rank2),
            '3' => Some(Rank3),
            '4' => Some(Rank4),
            '5' => Some(Rank5),
            '6' => Some(Rank6),
            '7' => Some(Rank7),
            '8' => Some(Rank8),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_char(&self) -> char {
        const VALUES: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];
        VALUES[self.to_index()]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Add<isize> for Rank {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        Self::try_from_index(self.to_index().checked_add_signed(rhs)?)
    }
}

/// A step across the board: `x` counts files, `y` counts ranks
/// (positive `y` heads towards rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

impl Offset {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let file = (self.file() + rhs.x)?;
        let rank = (self.rank() + rhs.y)?;
        Some(Square::new(file, rank))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

use Direction::{Down, DownLeft, DownRight, Left, Right, Up, UpLeft, UpRight};

impl Direction {
    pub const ALL: [Direction; 8] = [UpLeft, Up, UpRight, Left, Right, DownLeft, Down, DownRight];

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub fn is_orthogonal(&self) -> bool {
        matches!(*self, Up | Left | Right | Down)
    }
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        matches!(*self, UpLeft | UpRight | DownLeft | DownRight)
    }
    /// The direction a pawn of `color` advances in.
    pub const fn forward(color: Color) -> Self {
        match color {
            White => Up,
            Black => Down,
        }
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            UpLeft => Self::new(-1, 1),
            Up => Self::new(0, 1),
            UpRight => Self::new(1, 1),
            Left => Self::new(-1, 0),
            Right => Self::new(1, 0),
            DownLeft => Self::new(-1, -1),
            Down => Self::new(0, -1),
            DownRight => Self::new(1, -1),
        }
    }
}

impl Add<Direction> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

/// A set of squares packed into a `u64`; bit `n` is the square with
/// index `n`.
#[derive(Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    #[inline]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & square.to_mask().0) != 0
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= square.to_mask().0;
    }

    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !square.to_mask().0;
    }

    #[inline]
    pub fn first(&self) -> Option<Square> {
        self.iter().next()
    }

    pub fn iter(&self) -> MaskIter {
        MaskIter(self.0)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let square = Square::new(file, rank);
                write!(f, "{}", if self.contains(square) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromIterator<Square> for Mask {
    fn from_iter<I: IntoIterator<Item = Square>>(squares: I) -> Self {
        let mut mask = Mask::empty();
        for square in squares {
            mask |= square;
        }
        mask
    }
}

impl IntoIterator for Mask {
    type Item = Square;
    type IntoIter = MaskIter;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Sub<Square> for Mask {
    type Output = Self;
    fn sub(self, rhs: Square) -> Self::Output {
        Self(self.0 & !rhs.to_mask().0)
    }
}

impl Not for Mask {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl BitOr for Mask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitOrAssign<Square> for Mask {
    fn bitor_assign(&mut self, rhs: Square) {
        self.0 |= rhs.to_mask().0;
    }
}

impl BitAnd for Mask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Mask {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

/// Yields the squares of a mask in index order (`A1` first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskIter(u64);

impl Iterator for MaskIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let square = Square::from_index(self.0.trailing_zeros() as usize);
            self.0 &= self.0 - 1;
            return Some(square);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for MaskIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn test_coords_round_trip() {
        for square in Square::iter() {
            let (file, rank) = square.coords();
            assert_eq!(Square::from_coords(file as isize, rank as isize), Some(square));
        }
        for file in 0..8 {
            for rank in 0..8 {
                let square = Square::from_coords(file, rank).unwrap();
                assert_eq!(square.coords(), (file as usize, rank as usize));
            }
        }
    }
    #[test]
    fn test_label_round_trip() {
        for square in Square::iter() {
            let label = square.to_string();
            assert_eq!(label.parse::<Square>(), Ok(square));
        }
    }
    #[test]
    fn test_coords_and_labels_agree() {
        assert_eq!(Square::from_coords(0, 0), Some(A1));
        assert_eq!(Square::from_coords(4, 1), Some(E2));
        assert_eq!(Square::from_coords(7, 7), Some(H8));
        assert_eq!(E2.to_string(), "E2");
        assert_eq!(D4.coords(), (3, 3));
    }
    #[test]
    fn test_out_of_bounds_coords() {
        assert_eq!(Square::from_coords(-1, 0), None);
        assert_eq!(Square::from_coords(0, -1), None);
        assert_eq!(Square::from_coords(8, 3), None);
        assert_eq!(Square::from_coords(3, 8), None);
        assert!(Square::try_from((8, 8)).is_err());
        assert_eq!(Square::try_from((2, 5)), Ok(C6));
    }
    #[test]
    fn test_parse_labels() {
        assert_eq!("e4".parse::<Square>(), Ok(E4));
        assert_eq!("H8".parse::<Square>(), Ok(H8));
        assert!("I1".parse::<Square>().is_err());
        assert!("A9".parse::<Square>().is_err());
        assert!("A0".parse::<Square>().is_err());
        assert!("A".parse::<Square>().is_err());
        assert!("A12".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }
    #[test]
    fn test_direction_steps() {
        assert_eq!(E4 + Direction::Up, Some(E5));
        assert_eq!(E4 + Direction::DownLeft, Some(D3));
        assert_eq!(A1 + Direction::Left, None);
        assert_eq!(H8 + Direction::UpRight, None);
        assert_eq!(E2 + Direction::forward(Color::White), Some(E3));
        assert_eq!(E7 + Direction::forward(Color::Black), Some(E6));
    }
    #[test]
    fn test_direction_table_order() {
        for (index, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.to_index(), index);
        }
        assert_eq!(Direction::iter().filter(Direction::is_orthogonal).count(), 4);
        assert_eq!(Direction::iter().filter(Direction::is_diagonal).count(), 4);
    }
    #[test]
    fn test_mask_operations() {
        let mut mask: Mask = [A1, D4, H8].into_iter().collect();
        assert_eq!(mask.len(), 3);
        assert!(mask.contains(D4));
        mask.remove(D4);
        assert!(!mask.contains(D4));
        mask.insert(C3);
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![A1, C3, H8]);
        assert_eq!((mask - A1).first(), Some(C3));
        assert!((mask & !mask).is_empty());
    }
}
