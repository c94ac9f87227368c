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
use thiserror::Error;

use super::moves::Promotion;
use super::position::STARTING_POSITION;

/// Settings a board is created with. Every field has a default, so a
/// partial description (e.g. from a JSON config) is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Encoded position a new board starts from.
    pub starting_position: String,
    /// Piece a pawn becomes when a move does not name one.
    pub default_promotion: Promotion,
    /// Number of occurrences of the same position that draws the game.
    /// Must be at least 2.
    pub repetition_limit: u8,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Repetition limit must be at least 2, found {0}")]
    RepetitionLimit(u8),
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_position: STARTING_POSITION.to_string(),
            default_promotion: Promotion::Rook,
            repetition_limit: 3,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.repetition_limit < 2 {
            return Err(RulesError::RepetitionLimit(self.repetition_limit));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let rules: Rules = serde_json::from_str(r#"{"repetition_limit": 5}"#).unwrap();
        assert_eq!(rules.repetition_limit, 5);
        assert_eq!(rules.default_promotion, Promotion::Rook);
        assert_eq!(rules.starting_position, STARTING_POSITION);
        assert_eq!(rules.validate(), Ok(()));
    }
    #[test]
    fn test_repetition_limit_range() {
        for limit in [0, 1] {
            let rules = Rules {
                repetition_limit: limit,
                ..Default::default()
            };
            assert_eq!(rules.validate(), Err(RulesError::RepetitionLimit(limit)));
        }
        let rules = Rules {
            repetition_limit: 2,
            ..Default::default()
        };
        assert_eq!(rules.validate(), Ok(()));
    }
}
