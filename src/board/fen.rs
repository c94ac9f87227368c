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

//! Encoded positions
//!
//! A position is written as `<placement> <active-color> <halfmove-clock>
//! <fullmove-number>`. The placement lists ranks 8 down to 1 separated by
//! `/`; within a rank, files run from A to H with `K`, `R` and `P` for
//! White, lowercase for Black, and a digit for each run of empty squares.
//!
//! The six field form used by standard chess is also accepted on input.
//! Its castling and en passant fields are checked for shape and then
//! ignored, since neither rule exists in this variant.

use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::material::{Color, Material, MaterialError, Piece};
use super::position::{Pos, Position};
use super::square::{File, Rank, Square};
use super::Turn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("Expecting 4 or 6 space separated fields, found {0}")]
    FieldCount(usize),
    #[error("Expecting 8 ranks in the piece placement, found {0}")]
    RankCount(usize),
    #[error("Rank {0} does not describe exactly 8 squares")]
    RankLength(char),
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error("Invalid castling field: {0}")]
    Castling(String),
    #[error("Invalid en passant field: {0}")]
    EnPassant(String),
    #[error("Invalid move counter: {0}")]
    Counter(String),
    #[error("Expecting exactly one {0} king, found {1}")]
    KingCount(Color, usize),
}

impl Position {
    /// The piece placement field on its own.
    pub fn placement(&self) -> String {
        let mut result = String::new();
        for rank in Rank::iter().rev() {
            let mut empty = 0;
            for file in File::iter() {
                match self.contents(Square::new(file, rank)) {
                    Some(material) => {
                        if empty > 0 {
                            result.push_str(&empty.to_string());
                            empty = 0;
                        }
                        result.push(material.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                result.push_str(&empty.to_string());
            }
            if rank != Rank::Rank1 {
                result.push('/');
            }
        }
        result
    }

    pub fn export(&self) -> String {
        format!(
            "{} {} {} {}",
            self.placement(),
            self.turn().to_char(),
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.export())
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        let (placement, color, counters) = match fields.as_slice() {
            [placement, color, halfmove, fullmove] => (placement, color, [halfmove, fullmove]),
            [placement, color, castling, en_passant, halfmove, fullmove] => {
                check_castling(castling)?;
                check_en_passant(en_passant)?;
                (placement, color, [halfmove, fullmove])
            }
            _ => return Err(FenError::FieldCount(fields.len())),
        };

        let squares = parse_placement(placement)?;
        for color in Color::iter() {
            let king = Material::new(color, Piece::King);
            let count = squares.iter().filter(|&&m| m == Some(king)).count();
            if count != 1 {
                return Err(FenError::KingCount(color, count));
            }
        }
        let turn: Color = color.parse()?;
        let [halfmove, fullmove] = counters.map(|field| {
            field
                .parse::<u32>()
                .map_err(|_| FenError::Counter(field.to_string()))
        });
        Ok(Position::from_parts(squares, turn, halfmove?, fullmove?))
    }
}

fn parse_placement(placement: &str) -> Result<[Option<Material>; 64], FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }
    let mut squares = [None; 64];
    for (row, rank) in Rank::iter().rev().zip(ranks) {
        let mut file = 0;
        for c in rank.chars() {
            match c {
                '1'..='8' => file += c as usize - '0' as usize,
                _ => {
                    let material = Material::try_from_char(c)?;
                    if file >= 8 {
                        return Err(FenError::RankLength(row.to_char()));
                    }
                    squares[Square::new(File::from_index(file), row).to_index()] = Some(material);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::RankLength(row.to_char()));
            }
        }
        if file != 8 {
            return Err(FenError::RankLength(row.to_char()));
        }
    }
    Ok(squares)
}

fn check_castling(field: &str) -> Result<(), FenError> {
    let valid = field == "-"
        || (!field.is_empty() && field.chars().all(|c| matches!(c, 'K' | 'Q' | 'k' | 'q')));
    if valid {
        Ok(())
    } else {
        Err(FenError::Castling(field.to_string()))
    }
}

fn check_en_passant(field: &str) -> Result<(), FenError> {
    if field == "-" || field.parse::<Square>().is_ok() {
        Ok(())
    } else {
        Err(FenError::EnPassant(field.to_string()))
    }
}
