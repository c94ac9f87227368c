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

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::material::{Color, Material, Piece};
use super::position::Pos;
use super::square::{Direction, Mask, Rank, Square, SquareError};

use Color::*;
use Direction::*;
use Piece::*;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveError {
    #[error("Not a legal move")]
    InvalidMove,
    #[error("Not your turn")]
    NotYourTurn,
    #[error("Move would leave your king in check")]
    Check,
    #[error("Checkmate")]
    CheckMate,
    #[error("Draw")]
    Draw,
}

/// A move as submitted by a player: nothing about it has been validated.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

impl Move {
    pub fn new(from: Square, to: Square, promotion: Option<Promotion>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Builds a move from two square labels such as `"e2"` and `"E4"`.
    pub fn parse(from: &str, to: &str) -> Result<Self, SquareError> {
        Ok(Self::new(from.parse()?, to.parse()?, None))
    }

    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotion = Some(promotion);
        self
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion)?;
        }
        Ok(())
    }
}

/// The pieces a pawn may become on reaching the back rank.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Promotion {
    #[default]
    Rook,
}

impl From<Promotion> for Piece {
    fn from(value: Promotion) -> Self {
        match value {
            Promotion::Rook => Piece::Rook,
        }
    }
}

impl TryFrom<Piece> for Promotion {
    type Error = MoveError;
    fn try_from(value: Piece) -> Result<Self, Self::Error> {
        match value {
            Piece::Rook => Ok(Promotion::Rook),
            _ => Err(MoveError::InvalidMove),
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let piece: Piece = (*self).into();
        write!(f, "{}", piece.to_char())
    }
}

/// A move that has passed validation, with the material that lands on
/// the destination square already resolved (promotion included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalMove {
    from: Square,
    to: Square,
    material: Material,
    placed: Material,
}

impl LegalMove {
    pub(super) fn new(mv: Move, material: Material, default_promotion: Promotion) -> Self {
        let placed = if material.piece().is_pawn() && mv.to.rank().is_back_rank(!material.color())
        {
            let promotion = mv.promotion.unwrap_or(default_promotion);
            material.promoted(promotion.into())
        } else {
            material
        };
        Self {
            from: mv.from,
            to: mv.to,
            material,
            placed,
        }
    }
    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }
    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }
    /// The piece that moved.
    #[inline]
    pub fn material(&self) -> Material {
        self.material
    }
    /// The piece that ends up on the destination square.
    #[inline]
    pub fn placed(&self) -> Material {
        self.placed
    }
    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.material != self.placed
    }
}

/// Describes how far and in which directions a sliding piece may travel.
/// Rays halt at the first occupied square, which is included only when it
/// holds an enemy piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rays {
    orthogonal: bool,
    diagonal: bool,
    distance: usize,
}

impl Rays {
    pub const ROOK: Self = Self::new(true, false, 7);
    pub const KING: Self = Self::new(true, true, 1);

    pub const fn new(orthogonal: bool, diagonal: bool, distance: usize) -> Self {
        Self {
            orthogonal,
            diagonal,
            distance,
        }
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::iter().filter(|dir| {
            (self.orthogonal && dir.is_orthogonal()) || (self.diagonal && dir.is_diagonal())
        })
    }
}

pub trait PseudoLegalMoves: Pos {
    /// Destinations for the piece on `from` according to its movement
    /// pattern alone. Whether the move would expose the mover's own king
    /// is not considered. An empty square has no destinations.
    fn pseudo_legal_moves(&self, from: Square) -> Mask {
        match self.contents(from) {
            Some(material) => match material.piece() {
                Rook => self.cast_rays(from, material.color(), Rays::ROOK),
                King => self.cast_rays(from, material.color(), Rays::KING),
                Pawn => self.pawn_moves(from, material.color()),
            },
            None => Mask::empty(),
        }
    }

    fn cast_rays(&self, from: Square, color: Color, rays: Rays) -> Mask {
        let ours = self.occupied_by(color);
        let theirs = self.occupied_by(!color);
        let mut mask = Mask::empty();
        for dir in rays.directions() {
            for &square in RAYS[from.to_index()][dir.to_index()].iter().take(rays.distance) {
                if ours.contains(square) {
                    break;
                }
                mask |= square;
                if theirs.contains(square) {
                    break;
                }
            }
        }
        mask
    }

    fn pawn_moves(&self, from: Square, color: Color) -> Mask {
        let occupied = self.occupied();
        let theirs = self.occupied_by(!color);
        let mut mask = Mask::empty();
        let forward = Direction::forward(color);
        if let Some(one) = from + forward {
            if !occupied.contains(one) {
                mask |= one;
                if from.rank() == Rank::pawn_rank(color) {
                    if let Some(two) = one + forward {
                        if !occupied.contains(two) {
                            mask |= two;
                        }
                    }
                }
            }
        }
        for dir in pawn_captures(color) {
            if let Some(target) = from + dir {
                if theirs.contains(target) {
                    mask |= target;
                }
            }
        }
        mask
    }

    /// The union of pseudo-legal destinations of every piece of `color`.
    fn all_pseudo_legal_moves(&self, color: Color) -> Mask {
        let mut mask = Mask::empty();
        for from in self.occupied_by(color).iter() {
            mask |= self.pseudo_legal_moves(from);
        }
        mask
    }

    /// A side without a king on the board is never in check.
    fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.all_pseudo_legal_moves(!color).contains(king),
            None => false,
        }
    }
}

const fn pawn_captures(color: Color) -> [Direction; 2] {
    match color {
        White => [UpLeft, UpRight],
        Black => [DownLeft, DownRight],
    }
}

// Squares reached by stepping outward from a square in each direction,
// nearest first, stopping at the edge of the board.
static RAYS: Lazy<Vec<[Vec<Square>; 8]>> = Lazy::new(|| {
    fn ray(start: Square, dir: Direction) -> Vec<Square> {
        let mut squares = Vec::new();
        let mut next = start + dir;
        while let Some(square) = next {
            squares.push(square);
            next = square + dir;
        }
        squares
    }

    Square::iter()
        .map(|square| Direction::ALL.map(|dir| ray(square, dir)))
        .collect()
});

#[cfg(test)]
mod tests {
    use crate::*;
    use Square::*;

    fn empty_with(square: Square, material: Material) -> Position {
        Position::empty().set_contents(square, Some(material))
    }

    #[test]
    fn test_rook_on_empty_board() {
        let position = empty_with(D4, Material::WR);
        let destinations = position.pseudo_legal_moves(D4);
        assert_eq!(destinations.len(), 14);
        assert!(destinations.contains(D1));
        assert!(destinations.contains(D8));
        assert!(destinations.contains(A4));
        assert!(destinations.contains(H4));
        assert!(!destinations.contains(D4));
        assert!(!destinations.contains(E5));
    }
    #[test]
    fn test_rook_stops_at_pieces() {
        let position = empty_with(A1, Material::WR)
            .set_contents(A4, Some(Material::BP))
            .set_contents(D1, Some(Material::WP));
        let destinations = position.pseudo_legal_moves(A1);
        assert_eq!(destinations.len(), 5);
        assert!(destinations.contains(A2));
        assert!(destinations.contains(A4));
        assert!(!destinations.contains(A5));
        assert!(destinations.contains(C1));
        assert!(!destinations.contains(D1));
    }
    #[test]
    fn test_king_on_edge() {
        let position = empty_with(E1, Material::WK);
        let destinations = position.pseudo_legal_moves(E1);
        assert_eq!(destinations.len(), 5);
        assert!(destinations.contains(D1));
        assert!(destinations.contains(F2));
        assert!(!destinations.contains(E3));
    }
    #[test]
    fn test_king_in_center() {
        let position = empty_with(E4, Material::BK);
        let destinations = position.pseudo_legal_moves(E4);
        assert_eq!(destinations.len(), 8);
    }
    #[test]
    fn test_king_in_corner() {
        let position = empty_with(H8, Material::BK);
        assert_eq!(position.pseudo_legal_moves(H8).len(), 3);
    }
    #[test]
    fn test_king_excludes_friendly_includes_enemy() {
        let position = empty_with(E4, Material::WK)
            .set_contents(E5, Some(Material::WP))
            .set_contents(D5, Some(Material::BR));
        let destinations = position.pseudo_legal_moves(E4);
        assert_eq!(destinations.len(), 7);
        assert!(!destinations.contains(E5));
        assert!(destinations.contains(D5));
    }
    #[test]
    fn test_custom_rays() {
        let position = empty_with(D4, Material::WR);
        let diagonals = position.cast_rays(D4, Color::White, Rays::new(false, true, 7));
        assert_eq!(diagonals.len(), 13);
        let short = position.cast_rays(D4, Color::White, Rays::new(true, false, 2));
        assert_eq!(short.len(), 8);
    }
    #[test]
    fn test_white_pawn_advance() {
        let position = empty_with(E2, Material::WP);
        let destinations = position.pseudo_legal_moves(E2);
        assert_eq!(destinations.len(), 2);
        assert!(destinations.contains(E3));
        assert!(destinations.contains(E4));
    }
    #[test]
    fn test_black_pawn_advance() {
        let position = empty_with(D7, Material::BP);
        let destinations = position.pseudo_legal_moves(D7);
        assert_eq!(destinations.len(), 2);
        assert!(destinations.contains(D6));
        assert!(destinations.contains(D5));
    }
    #[test]
    fn test_pawn_single_advance_off_home_rank() {
        let position = empty_with(E3, Material::WP);
        let destinations = position.pseudo_legal_moves(E3);
        assert_eq!(destinations.len(), 1);
        assert!(destinations.contains(E4));
    }
    #[test]
    fn test_pawn_advance_blocked() {
        let position = empty_with(E2, Material::WP).set_contents(E3, Some(Material::BR));
        assert!(position.pseudo_legal_moves(E2).is_empty());
    }
    #[test]
    fn test_pawn_double_advance_blocked() {
        let position = empty_with(E7, Material::BP).set_contents(E5, Some(Material::WR));
        let destinations = position.pseudo_legal_moves(E7);
        assert_eq!(destinations.len(), 1);
        assert!(destinations.contains(E6));
    }
    #[test]
    fn test_pawn_captures_enemy_only() {
        let position = empty_with(D4, Material::WP)
            .set_contents(C5, Some(Material::BR))
            .set_contents(E5, Some(Material::WR));
        let destinations = position.pseudo_legal_moves(D4);
        assert!(destinations.contains(C5));
        assert!(!destinations.contains(E5));
        assert!(destinations.contains(D5));
        assert_eq!(destinations.len(), 2);
    }
    #[test]
    fn test_black_pawn_captures_downward() {
        let position = empty_with(D4, Material::BP)
            .set_contents(C3, Some(Material::WP))
            .set_contents(C5, Some(Material::WP));
        let destinations = position.pseudo_legal_moves(D4);
        assert!(destinations.contains(C3));
        assert!(!destinations.contains(C5));
    }
    #[test]
    fn test_pawn_on_last_rank_has_no_moves() {
        let position = empty_with(A8, Material::WP);
        assert!(position.pseudo_legal_moves(A8).is_empty());
    }
    #[test]
    fn test_empty_square_has_no_moves() {
        let position = Position::default();
        assert!(position.pseudo_legal_moves(D4).is_empty());
    }
    #[test]
    fn test_all_pseudo_legal_moves() {
        let position = Position::default();
        let white = position.all_pseudo_legal_moves(Color::White);
        // pawns: D3 D4 E3 E4, king: D1 F1 F2
        assert_eq!(white.len(), 7);
        let black = position.all_pseudo_legal_moves(Color::Black);
        // king: D8 D7 E7 F7 F8, rook: F8 G8 H1..H7
        assert_eq!(black.len(), 13);
    }
    #[test]
    fn test_is_in_check() {
        let position = empty_with(E1, Material::WK)
            .set_contents(E8, Some(Material::BR))
            .set_contents(A8, Some(Material::BK));
        assert!(position.is_in_check(Color::White));
        assert!(!position.is_in_check(Color::Black));
        let position = position.set_contents(E4, Some(Material::WP));
        assert!(!position.is_in_check(Color::White));
    }
    #[test]
    fn test_no_king_is_never_in_check() {
        let position = empty_with(E8, Material::BR);
        assert!(!position.is_in_check(Color::White));
    }
    #[test]
    fn test_legal_move_promotes() {
        let mv = Move::new(B7, B8, None);
        let legal = LegalMove::new(mv, Material::WP, Promotion::default());
        assert!(legal.is_promotion());
        assert_eq!(legal.placed(), Material::WR);
        let mv = Move::new(B7, B6, Some(Promotion::Rook));
        let legal = LegalMove::new(mv, Material::BP, Promotion::default());
        assert!(!legal.is_promotion());
        assert_eq!(legal.placed(), Material::BP);
    }
    #[test]
    fn test_promotion_from_piece() {
        assert_eq!(Promotion::try_from(Piece::Rook), Ok(Promotion::Rook));
        assert_eq!(Promotion::try_from(Piece::King), Err(MoveError::InvalidMove));
    }
    #[test]
    fn test_move_parse_and_display() {
        let mv = Move::parse("e2", "E4").unwrap();
        assert_eq!(mv, Move::new(E2, E4, None));
        assert_eq!(mv.to_string(), "E2E4");
        assert_eq!(mv.with_promotion(Promotion::Rook).to_string(), "E2E4R");
        assert!(Move::parse("e2", "e9").is_err());
    }
}
