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

use super::moves::{LegalMove, PseudoLegalMoves};
use super::position::{Pos, Position};
use super::Turn;

/// Short text for a move about to be made in `pos`: the piece letter
/// (omitted for pawns), `x` for a capture, the destination in lowercase,
/// `=R` on promotion and a `+` or `#` suffix when the move gives check or
/// mate. For example `e4`, `Rxh2`, `d8=R+`.
pub fn move_text(pos: &Position, mv: LegalMove) -> String {
    let mut s = String::new();
    let piece = mv.material().piece();
    if !piece.is_pawn() {
        s.push(piece.to_char());
    }
    if pos.is_occupied(mv.to()) {
        s.push('x');
    }
    s.push_str(&mv.to().to_string().to_lowercase());
    if mv.is_promotion() {
        s.push('=');
        s.push(mv.placed().piece().to_char());
    }
    s.push_str(check_suffix(pos, mv));
    s
}

fn check_suffix(pos: &Position, mv: LegalMove) -> &'static str {
    let next = pos.after(mv);
    let defender = next.turn();
    if !next.is_in_check(defender) {
        ""
    } else if next.has_legal_moves(defender) {
        "+"
    } else {
        "#"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;
    use Square::*;

    fn text(pos: &Position, from: Square, to: Square) -> String {
        let material = pos.contents(from).unwrap();
        let mv = LegalMove::new(Move::new(from, to, None), material, Promotion::default());
        move_text(pos, mv)
    }

    #[test]
    fn test_pawn_advance() {
        let position = Position::default();
        assert_eq!(text(&position, E2, E4), "e4");
    }
    #[test]
    fn test_rook_capture() {
        let position = Position::default()
            .set_turn(Color::Black)
            .set_contents(H2, Some(Material::WP));
        assert_eq!(text(&position, H8, H2), "Rxh2");
    }
    #[test]
    fn test_king_move() {
        let position = Position::default();
        assert_eq!(text(&position, E1, F2), "Kf2");
    }
    #[test]
    fn test_promotion_with_check() {
        let position = Position::empty()
            .set_contents(D7, Some(Material::WP))
            .set_contents(H8, Some(Material::BK))
            .set_contents(A1, Some(Material::WK));
        assert_eq!(text(&position, D7, D8), "d8=R+");
    }
    #[test]
    fn test_mate_suffix() {
        // Back rank mate: the white king covers the black king's escape.
        let position = Position::empty()
            .set_contents(A8, Some(Material::BK))
            .set_contents(B6, Some(Material::WK))
            .set_contents(H1, Some(Material::WR));
        assert_eq!(text(&position, H1, H8), "Rh8#");
    }
}
