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

use anyhow::Result;
use log::info;
#[cfg(feature = "random")]
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Board, BoardResult, Color, Move};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
    #[cfg(feature = "random")]
    pub fn random() -> Self {
        Self(thread_rng().gen())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win(Color, WinReason),
    Draw(DrawReason),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    CheckMate,
    Resigned,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    StaleMate,
    Repetition,
}

impl From<BoardResult> for GameResult {
    fn from(result: BoardResult) -> Self {
        match result {
            BoardResult::CheckMate(winner) => GameResult::Win(winner, WinReason::CheckMate),
            BoardResult::StaleMate => GameResult::Draw(DrawReason::StaleMate),
            BoardResult::Repetition => GameResult::Draw(DrawReason::Repetition),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("The game is already over")]
    GameOver,
}

/// A single game between two players: a board plus the outcomes that
/// happen away from it, such as a resignation.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    board: Board,
    resigned: Option<Color>,
}

impl Game {
    pub fn new(id: GameId, board: Board) -> Self {
        Self {
            id,
            board,
            resigned: None,
        }
    }
    #[cfg(feature = "random")]
    pub fn random_id(board: Board) -> Self {
        Self::new(GameId::random(), board)
    }

    pub fn id(&self) -> GameId {
        self.id
    }
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves are passed on to the board until someone resigns. Board
    /// results are reported by the board itself.
    pub fn submit_move(&mut self, mv: Move) -> Result<()> {
        if self.resigned.is_some() {
            return Err(GameError::GameOver.into());
        }
        self.board.submit_move(mv)
    }

    pub fn resign(&mut self, color: Color) -> Result<()> {
        if self.result().is_some() {
            return Err(GameError::GameOver.into());
        }
        info!("Game {:?}: {} resigned", self.id, color);
        self.resigned = Some(color);
        Ok(())
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.resigned {
            Some(color) => Some(GameResult::Win(!color, WinReason::Resigned)),
            None => self.board.board_result().map(GameResult::from),
        }
    }
}
