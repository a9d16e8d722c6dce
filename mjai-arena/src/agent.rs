//! Seats that play through the referee.
//!
//! An [`Agent`] keeps a [`SeatState`] current and asks its
//! [`DecisionPolicy`] what to answer. Random bots, scripted test seats and
//! network bridges differ only in the policy.

use mjai_engine::action::{Action, Response};
use mjai_engine::player::Player;
use mjai_engine::rule::GameRule;
use mjai_engine::tile::Pai;
use mjai_engine::types::{Furo, Wind};

use crate::seat_state::SeatState;

/// Chooses a seat's response to an action it has just seen.
pub trait DecisionPolicy: Send {
    /// `seat` already reflects `action`.
    fn decide(&mut self, seat: &SeatState, action: &Action) -> Option<Response>;
}

impl<F> DecisionPolicy for F
where
    F: FnMut(&SeatState, &Action) -> Option<Response> + Send,
{
    fn decide(&mut self, seat: &SeatState, action: &Action) -> Option<Response> {
        self(seat, action)
    }
}

/// Discards every drawn tile and never claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsumogiriPolicy;

impl DecisionPolicy for TsumogiriPolicy {
    fn decide(&mut self, seat: &SeatState, action: &Action) -> Option<Response> {
        let me = seat.id()?;
        match action {
            Action::Tsumo { actor, .. } if *actor == me => Some(Action::Dahai {
                actor: me,
                pai: seat.tsumo_pai()?,
                tsumogiri: true,
            }),
            // Only reached when another policy made the call.
            Action::Chi { actor, .. } | Action::Pon { actor, .. } | Action::Reach { actor }
                if *actor == me =>
            {
                seat.possible_dahais().first().map(|&pai| Action::Dahai {
                    actor: me,
                    pai,
                    tsumogiri: false,
                })
            }
            _ => None,
        }
    }
}

pub struct Agent<P> {
    seat: SeatState,
    policy: P,
    log: String,
}

impl<P: DecisionPolicy> Agent<P> {
    pub fn new(rule: GameRule, policy: P) -> Self {
        Self {
            seat: SeatState::new(rule),
            policy,
            log: String::new(),
        }
    }

    pub fn seat(&self) -> &SeatState {
        &self.seat
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Queue a line for the game log; it is written before the next action.
    pub fn log(&mut self, text: &str) {
        if !self.log.is_empty() {
            self.log.push('\n');
        }
        self.log.push_str(text);
    }
}

impl<P: DecisionPolicy> Player for Agent<P> {
    fn id(&self) -> Option<usize> {
        self.seat.id()
    }

    fn tehais(&self) -> &[Pai] {
        self.seat.tehais()
    }

    fn furos(&self) -> &[Furo] {
        self.seat.furos()
    }

    fn ho(&self) -> &[Pai] {
        self.seat.ho()
    }

    fn reach_ho_index(&self) -> Option<usize> {
        self.seat.reach_ho_index()
    }

    fn score(&self) -> i32 {
        self.seat.score()
    }

    fn jikaze(&self) -> Option<Wind> {
        self.seat.jikaze()
    }

    fn is_reach(&self) -> bool {
        self.seat.reach_state() == crate::seat_state::ReachState::Accepted
    }

    fn possible_dahais(&self) -> Vec<Pai> {
        self.seat.possible_dahais()
    }

    fn possible_furo_actions(&self) -> Vec<Action> {
        self.seat.possible_furo_actions()
    }

    fn can_reach(&self) -> bool {
        self.seat.can_reach()
    }

    fn can_hora(&self) -> bool {
        self.seat.can_hora()
    }

    fn update_state(&mut self, action: &Action) {
        self.seat.update(action);
    }

    fn respond_to_action(&mut self, action: &Action) -> Option<Response> {
        self.policy.decide(&self.seat, action)
    }

    fn log_text(&self) -> &str {
        &self.log
    }

    fn clear_log(&mut self) {
        self.log.clear();
    }
}
