//! The referee's view of a seat.
//!
//! A seat owns its private state; the referee reads it only through these
//! accessors and mutates it only through `update_state` and `clear_log`.

use crate::action::{Action, Response};
use crate::tile::Pai;
use crate::types::{Furo, Wind};

pub trait Player: Send {
    /// Seat index, known once `start_game` has been received.
    fn id(&self) -> Option<usize>;

    /// Concealed tiles; right after a draw the drawn tile is last.
    fn tehais(&self) -> &[Pai];
    fn furos(&self) -> &[Furo];
    /// Discard pond.
    fn ho(&self) -> &[Pai];
    /// Position in `ho` of the reach declaration tile.
    fn reach_ho_index(&self) -> Option<usize>;
    fn score(&self) -> i32;
    fn jikaze(&self) -> Option<Wind>;
    fn is_reach(&self) -> bool;

    fn possible_dahais(&self) -> Vec<Pai>;
    /// Melds and kans legal against the latest discard or draw.
    fn possible_furo_actions(&self) -> Vec<Action>;
    fn can_reach(&self) -> bool;
    fn can_hora(&self) -> bool;

    /// Apply an action already filtered for this seat.
    fn update_state(&mut self, action: &Action);
    fn respond_to_action(&mut self, action: &Action) -> Option<Response>;

    /// Text buffered for the game log since the last `clear_log`.
    fn log_text(&self) -> &str;
    fn clear_log(&mut self);
}
