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

//! Chess board for a King, Rook and Pawn variant
//!
//! A _board_ holds the state of a game in which each side only has a
//! king, rooks and pawns, and enforces the rules for moving them. The
//! following features are supported:
//!
//! [x] King, rook and pawn movement, including the pawn's double step
//! [x] Pawn promotion (to a rook, the only piece there is to promote to)
//! [x] Moves that leave the mover's king in check are rejected
//! [x] Checkmate and stalemate detection
//! [x] Enforce three-fold repetition rule
//! [x] Load and export positions as text
//! [ ] Castling and en passant (these rules do not exist in this variant)
//! [ ] Fifty-move rule (the halfmove clock is tracked but not enforced)
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square
//!   on an 8-by-8 board. The 8 rows and 8 columns on a board
//!   are represented by `Rank` (`Rank1` .. `Rank8`) and `File`
//!   (`FileA` .. `FileH`) respectively. Squares are named using the
//!   letter of the file followed by the number of the rank (`A1` .. `H8`).
//!
//! * A `Mask` is a 64-bit (u64) value in which each bit maps to a
//!   square on the board. Move destinations are returned as masks.
//!
//! * `Material` represents a piece of a specific color. A `Piece` is
//!   one of `King`, `Rook` or `Pawn`. `Promotion` lists what a pawn
//!   may become and converts to and from `Piece`.
//!
//! * A `Position` holds the contents of each square, whose turn it is
//!   and the move counters. It is a plain `Copy` value, so candidate
//!   moves are tried out on a scratch copy.
//!
//! * `PlayState` wraps a position with everything a game needs on top:
//!   the history of positions used for the repetition rule, the
//!   pieces captured so far, a text log of moves and the result.
//!   `Board` is the public face of a `PlayState`.
//!

use anyhow::Result;

mod fen;
mod material;
mod moves;
mod notation;
mod play;
mod position;
mod rules;
mod square;

pub use fen::*;
pub use material::*;
pub use moves::*;
pub use notation::*;
pub use play::*;
pub use position::*;
pub use rules::*;
pub use square::*;

pub trait Turn {
    fn turn(&self) -> Color;
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    state: PlayState,
}

impl Board {
    /// A board set up with the default starting position.
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_rules(rules: Rules) -> Result<Self> {
        Ok(Self {
            state: PlayState::new(rules)?,
        })
    }
    pub fn from_fen(encoded: &str) -> Result<Self> {
        let mut board = Self::new();
        board.load(encoded)?;
        Ok(board)
    }

    /// Replaces the game with an encoded position. On error the board is
    /// left as it was.
    pub fn load(&mut self, encoded: &str) -> Result<()> {
        self.state.load(encoded)
    }
    pub fn export(&self) -> String {
        self.state.export()
    }

    pub fn submit_move(&mut self, mv: Move) -> Result<()> {
        self.state.submit_move(mv)
    }
    /// Like `submit_move` but with squares given by name, e.g. `"e2"`.
    pub fn move_piece(&mut self, from: &str, to: &str, promotion: Option<Promotion>) -> Result<()> {
        let mut mv = Move::parse(from, to)?;
        mv.promotion = promotion;
        self.submit_move(mv)
    }
    pub fn validate_move(&self, mv: Move) -> Result<LegalMove, MoveError> {
        self.state.validate_move(mv)
    }

    /// Destinations by movement pattern alone; see `legal_destinations`
    /// for the ones that will actually be accepted.
    pub fn move_destinations(&self, from: Square) -> Mask {
        self.state.pseudo_legal_moves(from)
    }
    pub fn legal_destinations(&self, from: Square) -> Mask {
        self.state.legal_destinations(from)
    }
    pub fn occupied_squares(&self, color: Color) -> Mask {
        self.state.occupied_by(color)
    }

    pub fn board_result(&self) -> Option<BoardResult> {
        self.state.board_result()
    }
    pub fn position_history(&self) -> &[String] {
        self.state.position_history()
    }
    pub fn move_log(&self) -> &[String] {
        self.state.move_log()
    }
    pub fn captured(&self, color: Color) -> &[Material] {
        self.state.captured(color)
    }
    pub fn rules(&self) -> &Rules {
        self.state.rules()
    }
}

impl Turn for Board {
    #[inline]
    fn turn(&self) -> Color {
        self.state.turn()
    }
}

impl AsRef<Position> for Board {
    fn as_ref(&self) -> &Position {
        self.state.as_ref()
    }
}

impl Pos for Board {}

impl PseudoLegalMoves for Board {}
