//! MJAI messages exchanged between the referee and the seats.
//!
//! Every message is a JSON object tagged by `"type"`. The referee emits
//! [`Action`]s; a seat answers with an optional [`Response`], which uses the
//! same shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{RefereeError, RefereeResult, ValidationError};
use crate::tile::Pai;
use crate::types::{Wind, NUM_PLAYERS};

/// The type tag of a message, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    StartGame,
    StartKyoku,
    Tsumo,
    Dahai,
    Chi,
    Pon,
    Ankan,
    Daiminkan,
    Kakan,
    Reach,
    ReachAccepted,
    Hora,
    Ryukyoku,
    Dora,
    EndKyoku,
    EndGame,
    Log,
    Error,
}

impl ActionType {
    pub const ALL: [ActionType; 18] = [
        ActionType::StartGame,
        ActionType::StartKyoku,
        ActionType::Tsumo,
        ActionType::Dahai,
        ActionType::Chi,
        ActionType::Pon,
        ActionType::Ankan,
        ActionType::Daiminkan,
        ActionType::Kakan,
        ActionType::Reach,
        ActionType::ReachAccepted,
        ActionType::Hora,
        ActionType::Ryukyoku,
        ActionType::Dora,
        ActionType::EndKyoku,
        ActionType::EndGame,
        ActionType::Log,
        ActionType::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::StartGame => "start_game",
            ActionType::StartKyoku => "start_kyoku",
            ActionType::Tsumo => "tsumo",
            ActionType::Dahai => "dahai",
            ActionType::Chi => "chi",
            ActionType::Pon => "pon",
            ActionType::Ankan => "ankan",
            ActionType::Daiminkan => "daiminkan",
            ActionType::Kakan => "kakan",
            ActionType::Reach => "reach",
            ActionType::ReachAccepted => "reach_accepted",
            ActionType::Hora => "hora",
            ActionType::Ryukyoku => "ryukyoku",
            ActionType::Dora => "dora",
            ActionType::EndKyoku => "end_kyoku",
            ActionType::EndGame => "end_game",
            ActionType::Log => "log",
            ActionType::Error => "error",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    StartGame {
        /// Receiving seat; filled in per seat by the view filter.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        names: Option<Vec<String>>,
    },
    StartKyoku {
        bakaze: Wind,
        kyoku: u8,
        honba: u8,
        #[serde(default)]
        kyotaku: u8,
        oya: usize,
        dora_marker: Pai,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scores: Option<[i32; NUM_PLAYERS]>,
        tehais: Vec<Vec<Pai>>,
    },
    Tsumo {
        actor: usize,
        pai: Pai,
    },
    Dahai {
        actor: usize,
        pai: Pai,
        tsumogiri: bool,
    },
    Chi {
        actor: usize,
        target: usize,
        pai: Pai,
        consumed: Vec<Pai>,
    },
    Pon {
        actor: usize,
        target: usize,
        pai: Pai,
        consumed: Vec<Pai>,
    },
    Ankan {
        actor: usize,
        consumed: Vec<Pai>,
    },
    Daiminkan {
        actor: usize,
        target: usize,
        pai: Pai,
        consumed: Vec<Pai>,
    },
    Kakan {
        actor: usize,
        pai: Pai,
        consumed: Vec<Pai>,
    },
    Reach {
        actor: usize,
    },
    ReachAccepted {
        actor: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deltas: Option<[i32; NUM_PLAYERS]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scores: Option<[i32; NUM_PLAYERS]>,
    },
    Hora {
        actor: usize,
        target: usize,
        pai: Pai,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uradora_markers: Option<Vec<Pai>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deltas: Option<[i32; NUM_PLAYERS]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scores: Option<[i32; NUM_PLAYERS]>,
    },
    Ryukyoku {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deltas: Option<[i32; NUM_PLAYERS]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scores: Option<[i32; NUM_PLAYERS]>,
    },
    Dora {
        dora_marker: Pai,
    },
    EndKyoku,
    EndGame,
    Log {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        actor: Option<usize>,
        #[serde(default)]
        text: String,
    },
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        actor: Option<usize>,
        #[serde(default)]
        message: String,
    },
}

/// What a seat sends back. Same wire shape as [`Action`], always with an actor.
pub type Response = Action;

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::StartGame { .. } => ActionType::StartGame,
            Action::StartKyoku { .. } => ActionType::StartKyoku,
            Action::Tsumo { .. } => ActionType::Tsumo,
            Action::Dahai { .. } => ActionType::Dahai,
            Action::Chi { .. } => ActionType::Chi,
            Action::Pon { .. } => ActionType::Pon,
            Action::Ankan { .. } => ActionType::Ankan,
            Action::Daiminkan { .. } => ActionType::Daiminkan,
            Action::Kakan { .. } => ActionType::Kakan,
            Action::Reach { .. } => ActionType::Reach,
            Action::ReachAccepted { .. } => ActionType::ReachAccepted,
            Action::Hora { .. } => ActionType::Hora,
            Action::Ryukyoku { .. } => ActionType::Ryukyoku,
            Action::Dora { .. } => ActionType::Dora,
            Action::EndKyoku => ActionType::EndKyoku,
            Action::EndGame => ActionType::EndGame,
            Action::Log { .. } => ActionType::Log,
            Action::Error { .. } => ActionType::Error,
        }
    }

    pub fn actor(&self) -> Option<usize> {
        match self {
            Action::Tsumo { actor, .. }
            | Action::Dahai { actor, .. }
            | Action::Chi { actor, .. }
            | Action::Pon { actor, .. }
            | Action::Ankan { actor, .. }
            | Action::Daiminkan { actor, .. }
            | Action::Kakan { actor, .. }
            | Action::Reach { actor }
            | Action::ReachAccepted { actor, .. }
            | Action::Hora { actor, .. } => Some(*actor),
            Action::Log { actor, .. } | Action::Error { actor, .. } => *actor,
            Action::StartGame { .. }
            | Action::StartKyoku { .. }
            | Action::Ryukyoku { .. }
            | Action::Dora { .. }
            | Action::EndKyoku
            | Action::EndGame => None,
        }
    }

    pub fn target(&self) -> Option<usize> {
        match self {
            Action::Chi { target, .. }
            | Action::Pon { target, .. }
            | Action::Daiminkan { target, .. }
            | Action::Hora { target, .. } => Some(*target),
            _ => None,
        }
    }

    pub fn pai(&self) -> Option<Pai> {
        match self {
            Action::Tsumo { pai, .. }
            | Action::Dahai { pai, .. }
            | Action::Chi { pai, .. }
            | Action::Pon { pai, .. }
            | Action::Daiminkan { pai, .. }
            | Action::Kakan { pai, .. }
            | Action::Hora { pai, .. } => Some(*pai),
            _ => None,
        }
    }

    pub fn consumed(&self) -> Option<&[Pai]> {
        match self {
            Action::Chi { consumed, .. }
            | Action::Pon { consumed, .. }
            | Action::Ankan { consumed, .. }
            | Action::Daiminkan { consumed, .. }
            | Action::Kakan { consumed, .. } => Some(consumed),
            _ => None,
        }
    }

    pub fn is_log(&self) -> bool {
        matches!(self, Action::Log { .. })
    }

    /// Single-line JSON, the MJAI wire form.
    pub fn to_json(&self) -> RefereeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(line: &str) -> RefereeResult<Action> {
        Ok(serde_json::from_str(line)?)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

/// Decode one response line from a seat.
///
/// `{"type":"none"}` means the seat passes. Once the line is valid JSON, any
/// decoding failure (unknown type tag, missing field, bad tile) is the seat's
/// fault and becomes a [`ValidationError`]. Only a line that is not JSON at
/// all is fatal.
pub fn decode_response(line: &str) -> RefereeResult<Option<Response>> {
    let value: Value = serde_json::from_str(line)?;
    let tag = match value.get("type") {
        Some(Value::String(tag)) => tag.clone(),
        _ => return Err(ValidationError::new("type missing.").into()),
    };
    if tag == "none" {
        return Ok(None);
    }
    if serde_json::from_value::<ActionType>(Value::String(tag.clone())).is_err() {
        return Err(ValidationError::new(format!(
            "Unexpected response type '{}' for {}.",
            tag,
            line.trim()
        ))
        .into());
    }
    serde_json::from_value::<Response>(value)
        .map(Some)
        .map_err(|err| {
            let message = err.to_string();
            let reason = match missing_field(&message) {
                Some(field) => format!("{} missing.", field),
                None => format!("Malformed response: {}", message),
            };
            RefereeError::Validation(ValidationError::new(reason))
        })
}

fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
}
