//! MJAI Mahjong Referee
//!
//! The single source of truth for a four-seat Riichi Mahjong table spoken
//! over the MJAI message protocol: applies actions to the shared state,
//! hands each seat a redacted view, and validates what each seat answers.

pub mod action;
pub mod board;
pub mod errors;
pub mod game;
pub mod hora;
pub mod player;
pub mod rule;
pub mod state;
pub mod tile;
pub mod types;
pub mod validation;
pub mod view;

pub use action::{decode_response, Action, ActionType, Response};
pub use errors::{RefereeError, RefereeResult, ValidationError};
pub use game::{ActionObserver, Game, Responses};
pub use hora::{HoraPoints, HoraRequest, HoraType, Scorer, SituationalFlags};
pub use player::Player;
pub use rule::GameRule;
pub use tile::Pai;
pub use types::{Furo, FuroKind, Wind, NUM_PLAYERS};
