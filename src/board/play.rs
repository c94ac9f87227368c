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

use anyhow::Result;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::material::{Color, Material, Pair};
use super::moves::{LegalMove, Move, MoveError, PseudoLegalMoves};
use super::notation::move_text;
use super::position::{Pos, Position};
use super::rules::Rules;
use super::square::{Mask, Square};
use super::Turn;

use MoveError::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardResult {
    /// The side that delivered mate.
    CheckMate(Color),
    StaleMate,
    Repetition,
}

#[derive(Debug, Clone)]
pub struct PlayState {
    rules: Rules,
    position: Position,
    position_history: Vec<String>,
    repetitions: HashMap<String, u8>,
    captured: Pair<Vec<Material>>,
    move_log: Vec<String>,
    result: Option<BoardResult>,
}

impl Default for PlayState {
    fn default() -> Self {
        Self::with_position(Rules::default(), Position::default())
    }
}

impl PlayState {
    pub fn new(rules: Rules) -> Result<Self> {
        rules.validate()?;
        let position = rules.starting_position.parse()?;
        Ok(Self::with_position(rules, position))
    }

    fn with_position(rules: Rules, position: Position) -> Self {
        let mut state = Self {
            rules,
            position,
            position_history: Vec::new(),
            repetitions: HashMap::new(),
            captured: Pair::default(),
            move_log: Vec::new(),
            result: None,
        };
        state.update_result(0);
        state
    }

    /// Replaces the whole game state with an encoded position. The
    /// position history starts over.
    pub fn load(&mut self, encoded: &str) -> Result<()> {
        let position: Position = encoded.parse()?;
        debug!("Loaded position {}", position);
        *self = Self::with_position(self.rules.clone(), position);
        Ok(())
    }

    pub fn export(&self) -> String {
        self.position.export()
    }

    pub fn submit_move(&mut self, mv: Move) -> Result<()> {
        let legal = self.validate_move(mv).map_err(|err| {
            trace!("Rejected {}: {}", mv, err);
            err
        })?;
        self.apply_move(legal);
        Ok(())
    }

    /// Checks a move against the current position without changing it.
    ///
    /// The checks run in a fixed order: turn ownership, the piece's
    /// movement pattern, then whether the move leaves the mover's king in
    /// check. A side with no legal move at all gets `CheckMate` or `Draw`
    /// in place of the last two.
    pub fn validate_move(&self, mv: Move) -> Result<LegalMove, MoveError> {
        let pos = &self.position;
        let material = pos.contents(mv.from).ok_or(InvalidMove)?;
        if material.color() != pos.turn() {
            return Err(NotYourTurn);
        }
        if self.result == Some(BoardResult::Repetition) {
            return Err(Draw);
        }
        if !pos.pseudo_legal_moves(mv.from).contains(mv.to) {
            return Err(self.unless_concluded(InvalidMove));
        }
        let legal = LegalMove::new(mv, material, self.rules.default_promotion);
        let opponent = !material.color();
        if !pos.all_pseudo_legal_moves(opponent).is_empty() && pos.leaves_in_check(legal) {
            return Err(self.unless_concluded(Check));
        }
        Ok(legal)
    }

    /// Destinations from `from` that pass full validation.
    pub fn legal_destinations(&self, from: Square) -> Mask {
        self.pseudo_legal_moves(from)
            .iter()
            .filter(|&to| self.validate_move(Move::new(from, to, None)).is_ok())
            .collect()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board_result(&self) -> Option<BoardResult> {
        self.result
    }

    pub fn position_history(&self) -> &[String] {
        &self.position_history
    }

    pub fn move_log(&self) -> &[String] {
        &self.move_log
    }

    /// Pieces captured by `color`, in the order they were taken.
    pub fn captured(&self, color: Color) -> &[Material] {
        &self.captured[color]
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    fn unless_concluded(&self, err: MoveError) -> MoveError {
        match self.result {
            Some(BoardResult::CheckMate(_)) => CheckMate,
            Some(BoardResult::StaleMate) => Draw,
            _ => err,
        }
    }

    fn apply_move(&mut self, mv: LegalMove) {
        let text = move_text(&self.position, mv);
        if let Some(captured) = self.position.apply_move(mv) {
            self.captured[mv.material().color()].push(captured);
        }
        debug!("{} played {} ({})", mv.material().color(), text, self.position);
        self.move_log.push(text);
        let repetitions = self.update_repetitions();
        self.update_result(repetitions);
    }

    fn update_repetitions(&mut self) -> u8 {
        if self.position.halfmove_clock() == 0 {
            // A pawn move or a capture can never be undone, so no earlier
            // position can come up again.
            self.repetitions.clear();
        }
        let key = self.position.repetition_key();
        self.position_history.push(key.clone());
        let count = self.repetitions.entry(key).or_insert(0);
        *count += 1;
        trace!("Repetition count: {}", *count);
        *count
    }

    fn update_result(&mut self, repetitions: u8) {
        let turn = self.position.turn();
        self.result = if !self.position.has_legal_moves(turn) {
            if self.position.is_in_check(turn) {
                Some(BoardResult::CheckMate(!turn))
            } else {
                Some(BoardResult::StaleMate)
            }
        } else if repetitions >= self.rules.repetition_limit {
            Some(BoardResult::Repetition)
        } else {
            None
        };
        if let Some(result) = self.result {
            info!("Game over: {:?}", result);
        }
    }
}

impl Turn for PlayState {
    fn turn(&self) -> Color {
        self.position.turn()
    }
}

impl AsRef<Position> for PlayState {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}

impl Pos for PlayState {}

impl PseudoLegalMoves for PlayState {}
