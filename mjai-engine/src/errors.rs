use std::fmt;

use thiserror::Error;

use crate::action::Response;

/// A participant sent a response the referee refuses to accept.
///
/// `player` and `response` are filled in once the failure is attributed to a
/// seat; a bare reason is what the individual rule checks produce.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub reason: String,
    pub player: Option<usize>,
    pub response: Option<Response>,
}

impl ValidationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            player: None,
            response: None,
        }
    }

    /// Attach the offending seat and its response.
    pub fn at_seat(self, seat: usize, response: Option<Response>) -> Self {
        Self {
            reason: self.reason,
            player: Some(seat),
            response,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.player {
            Some(seat) => {
                write!(f, "Error in player {}'s response: {} Response: ", seat, self.reason)?;
                match &self.response {
                    Some(response) => write!(f, "{}", response),
                    None => f.write_str("none"),
                }
            }
            None => f.write_str(&self.reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Error)]
pub enum RefereeError {
    /// A seat's response broke the protocol; recoverable at the caller's discretion.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The referee was driven into an impossible state (programming error).
    #[error("Invalid state: {message}")]
    InvalidState { message: String },
    /// Tile or hand notation could not be parsed.
    #[error("Parse error on '{input}': {message}")]
    Parse { input: String, message: String },
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl RefereeError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        RefereeError::InvalidState {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, RefereeError::Validation(_))
    }
}

impl From<serde_json::Error> for RefereeError {
    fn from(err: serde_json::Error) -> Self {
        RefereeError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type RefereeResult<T> = Result<T, RefereeError>;
