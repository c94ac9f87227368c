// Copyright 2026 Tobin Edwards
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
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut, Not};
use std::str::FromStr;
use strum_macros::Display;
use strum_macros::EnumIter;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    #[error("Invalid color: {0:?} (expecting 'w' or 'b')")]
    InvalidColor(String),
    #[error("Invalid piece: {0:?} (expecting one of 'K', 'R', 'P' in either case)")]
    InvalidPiece(char),
}

/// A piece of a specific color.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    color: Color,
    piece: Piece,
}

impl Material {
    pub const WK: Self = Self {
        color: White,
        piece: King,
    };
    pub const WR: Self = Self {
        color: White,
        piece: Rook,
    };
    pub const WP: Self = Self {
        color: White,
        piece: Pawn,
    };

    pub const BK: Self = Self {
        color: Black,
        piece: King,
    };
    pub const BR: Self = Self {
        color: Black,
        piece: Rook,
    };
    pub const BP: Self = Self {
        color: Black,
        piece: Pawn,
    };

    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        Self { color, piece }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// The same color with a different piece, as produced by promotion.
    #[inline]
    pub fn promoted(self, piece: Piece) -> Self {
        Self::new(self.color, piece)
    }

    /// Letter used in encoded positions: uppercase for White and
    /// lowercase for Black.
    pub fn to_char(&self) -> char {
        let c = self.piece.to_char();
        match self.color {
            White => c,
            Black => c.to_ascii_lowercase(),
        }
    }

    pub fn try_from_char(c: char) -> Result<Self, MaterialError> {
        let piece = Piece::try_from_char(c)?;
        let color = if c.is_ascii_uppercase() { White } else { Black };
        Ok(Self::new(color, piece))
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn to_index(&self) -> usize {
        *self as usize
    }

    pub const fn to_char(&self) -> char {
        match self {
            White => 'w',
            Black => 'b',
        }
    }
}

impl FromStr for Color {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" | "W" | "white" | "White" => Ok(White),
            "b" | "B" | "black" | "Black" => Ok(Black),
            _ => Err(MaterialError::InvalidColor(s.to_string())),
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
}

impl<T> Pair<T> {
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T: Hash> Hash for Pair<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.white().hash(state);
        self.black().hash(state);
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Piece {
    Pawn,
    Rook,
    King,
}
use Piece::{King, Pawn, Rook};

impl Piece {
    pub fn to_index(&self) -> usize {
        *self as usize
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }

    pub const fn to_char(&self) -> char {
        match self {
            Pawn => 'P',
            Rook => 'R',
            King => 'K',
        }
    }

    pub fn try_from_char(c: char) -> Result<Self, MaterialError> {
        match c.to_ascii_uppercase() {
            'P' => Ok(Pawn),
            'R' => Ok(Rook),
            'K' => Ok(King),
            _ => Err(MaterialError::InvalidPiece(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_material_chars() {
        assert_eq!(Material::WK.to_char(), 'K');
        assert_eq!(Material::BR.to_char(), 'r');
        assert_eq!(Material::try_from_char('p'), Ok(Material::BP));
        assert_eq!(Material::try_from_char('R'), Ok(Material::WR));
        assert_eq!(
            Material::try_from_char('q'),
            Err(MaterialError::InvalidPiece('q'))
        );
    }
    #[test]
    fn test_material_chars_round_trip() {
        for color in Color::iter() {
            for piece in Piece::iter() {
                let material = Material::new(color, piece);
                assert_eq!(Material::try_from_char(material.to_char()), Ok(material));
            }
        }
    }
    #[test]
    fn test_parse_color() {
        assert_eq!("w".parse::<Color>(), Ok(Color::White));
        assert_eq!("b".parse::<Color>(), Ok(Color::Black));
        assert!(matches!(
            "x".parse::<Color>(),
            Err(MaterialError::InvalidColor(_))
        ));
        assert_eq!(!Color::White, Color::Black);
    }
    #[test]
    fn test_promoted_keeps_color() {
        let promoted = Material::BP.promoted(Piece::Rook);
        assert_eq!(promoted, Material::BR);
    }
    #[test]
    fn test_pair_index() {
        let mut pair = Pair::new(1, 2);
        pair[Color::Black] += 5;
        assert_eq!(pair[Color::White], 1);
        assert_eq!(pair[Color::Black], 7);
    }
}
