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
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;

use super::material::{Color, Material, Piece};
use super::moves::{LegalMove, Move, Promotion, PseudoLegalMoves};
use super::square::{Mask, Square};
use super::Turn;

use Color::*;
use Square::*;

/// The default starting layout: kings on their usual squares, a single
/// black rook and two white pawns.
pub const STARTING_POSITION: &str = "4k2r/8/8/8/8/8/3PP3/4K3 w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Squares([Option<Material>; 64]);

impl Squares {
    fn empty() -> Self {
        Self([None; 64])
    }
}

impl Index<Square> for Squares {
    type Output = Option<Material>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Square> for Squares {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}

/// Everything needed to describe a point in the game: the contents of
/// every square, whose turn it is and the move counters. A position is a
/// plain value, so copying it to try out a move is cheap.
///
/// Equality and hashing ignore `last_move`, which is not part of the
/// encoded form.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    squares: Squares,
    turn: Color,
    halfmove_clock: u32,
    fullmove_number: u32,
    last_move: Option<(Square, Square)>,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.turn == other.turn
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.squares.hash(state);
        self.turn.hash(state);
        self.halfmove_clock.hash(state);
        self.fullmove_number.hash(state);
    }
}

impl Default for Position {
    fn default() -> Self {
        let mut position = Self::empty();
        position.place(E8, Material::BK);
        position.place(H8, Material::BR);
        position.place(D2, Material::WP);
        position.place(E2, Material::WP);
        position.place(E1, Material::WK);
        position
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.export())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        encoded.parse().map_err(serde::de::Error::custom)
    }
}

impl Position {
    /// A board with no pieces, White to move.
    pub fn empty() -> Self {
        Self {
            squares: Squares::empty(),
            turn: White,
            halfmove_clock: 0,
            fullmove_number: 1,
            last_move: None,
        }
    }

    pub(super) fn from_parts(
        squares: [Option<Material>; 64],
        turn: Color,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        Self {
            squares: Squares(squares),
            turn,
            halfmove_clock,
            fullmove_number,
            last_move: None,
        }
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    /// Piece placement and side to move. Two positions with the same key
    /// count as a repetition of each other.
    pub fn repetition_key(&self) -> String {
        format!("{} {}", self.placement(), self.turn.to_char())
    }

    /// Moves a piece without any validation and advances the turn and
    /// move counters. Returns the captured piece, if any.
    pub fn apply_move(&mut self, mv: LegalMove) -> Option<Material> {
        self.remove(mv.from());
        let captured = self.place(mv.to(), mv.placed());
        self.last_move = Some((mv.from(), mv.to()));

        // Counters stop at their maximum rather than wrap.
        self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        if captured.is_some() || mv.material().piece() == Piece::Pawn {
            self.halfmove_clock = 0;
        }
        if self.turn == Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.turn = !self.turn;
        captured
    }

    /// A copy of this position with `mv` applied; `self` is untouched.
    pub fn after(&self, mv: LegalMove) -> Position {
        let mut scratch = *self;
        scratch.apply_move(mv);
        scratch
    }

    /// True if making `mv` would leave the mover's king attacked.
    pub fn leaves_in_check(&self, mv: LegalMove) -> bool {
        self.after(mv).is_in_check(mv.material().color())
    }

    /// True if `color` has at least one move that does not leave its king
    /// in check.
    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.occupied_by(color).iter().any(|from| {
            let Some(material) = self[from] else {
                return false;
            };
            self.pseudo_legal_moves(from).iter().any(|to| {
                let mv = LegalMove::new(Move::new(from, to, None), material, Promotion::default());
                !self.leaves_in_check(mv)
            })
        })
    }

    fn place(&mut self, square: Square, material: Material) -> Option<Material> {
        self.squares[square].replace(material)
    }

    fn remove(&mut self, square: Square) -> Option<Material> {
        self.squares[square].take()
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl Index<Square> for Position {
    type Output = Option<Material>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl AsRef<Self> for Position {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl Pos for Position {}

impl PseudoLegalMoves for Position {}

/// Read-only queries shared by everything that wraps a position.
pub trait Pos: Turn + AsRef<Position> {
    #[inline]
    fn contents(&self, square: Square) -> Option<Material> {
        let pos: &Position = self.as_ref();
        pos.squares[square]
    }
    #[inline]
    fn occupied_by(&self, color: Color) -> Mask {
        let pos: &Position = self.as_ref();
        Square::iter()
            .filter(|&square| matches!(pos.squares[square], Some(m) if m.color() == color))
            .collect()
    }
    #[inline]
    fn occupied(&self) -> Mask {
        self.white() | self.black()
    }
    #[inline]
    fn white(&self) -> Mask {
        self.occupied_by(White)
    }
    #[inline]
    fn black(&self) -> Mask {
        self.occupied_by(Black)
    }
    #[inline]
    fn ours(&self) -> Mask {
        self.occupied_by(self.turn())
    }
    #[inline]
    fn theirs(&self) -> Mask {
        self.occupied_by(!self.turn())
    }
    /// The square holding `color`'s king, or `None` if it has none.
    #[inline]
    fn king_square(&self, color: Color) -> Option<Square> {
        let pos: &Position = self.as_ref();
        Square::iter().find(|&square| pos.squares[square] == Some(Material::new(color, Piece::King)))
    }
    #[inline]
    fn is_vacant(&self, square: Square) -> bool {
        self.contents(square).is_none()
    }
    #[inline]
    fn is_occupied(&self, square: Square) -> bool {
        self.contents(square).is_some()
    }
}

#[cfg(test)]
impl Position {
    pub fn set_contents(mut self, square: Square, value: Option<Material>) -> Self {
        self.squares[square] = value;
        self
    }
    pub fn set_turn(mut self, value: Color) -> Self {
        self.turn = value;
        self
    }
    pub fn set_halfmove_clock(mut self, value: u32) -> Self {
        self.halfmove_clock = value;
        self
    }
}
