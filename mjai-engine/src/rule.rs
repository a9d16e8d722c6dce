use serde::{Deserialize, Serialize};

use crate::errors::RefereeResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameRule {
    /// One five of each suit is red (aka-dora).
    pub red_fives: bool,
    /// Forbid discarding the called tile (or its suji swap) right after chi/pon.
    pub kuikae_forbidden: bool,
    pub starting_score: i32,
    /// Deposit paid when a reach is accepted.
    pub reach_cost: i32,
}

impl Default for GameRule {
    fn default() -> Self {
        Self::default_mjai()
    }
}

impl GameRule {
    pub fn default_mjai() -> Self {
        Self {
            red_fives: true,
            kuikae_forbidden: true,
            starting_score: 25_000,
            reach_cost: 1_000,
        }
    }

    pub fn no_red() -> Self {
        Self {
            red_fives: false,
            ..Self::default_mjai()
        }
    }

    pub fn from_json_str(json: &str) -> RefereeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
