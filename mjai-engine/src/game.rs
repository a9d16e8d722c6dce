//! The referee: applies actions, broadcasts per-seat views and checks the
//! answers.

use std::cmp::Reverse;

use tracing::{debug, trace, warn};

use crate::action::{Action, Response};
use crate::errors::{RefereeError, RefereeResult};
use crate::hora::{HoraRequest, SituationalFlags};
use crate::player::Player;
use crate::rule::GameRule;
use crate::state::{GameState, GameStateEventHandler};
use crate::tile::Pai;
use crate::types::{Wind, NUM_PLAYERS};
use crate::validation;
use crate::view::action_in_view;

/// Receives every raw action right after it is applied.
pub type ActionObserver = Box<dyn FnMut(&Action) + Send>;

pub type Responses = [Option<Response>; NUM_PLAYERS];

pub struct Game {
    state: GameState,
    players: [Box<dyn Player>; NUM_PLAYERS],
    observer: Option<ActionObserver>,
}

impl Game {
    pub fn new(
        players: [Box<dyn Player>; NUM_PLAYERS],
        rule: GameRule,
        observer: Option<ActionObserver>,
    ) -> Self {
        Self {
            state: GameState::new(rule),
            players,
            observer,
        }
    }

    /// Execute `action` and return every seat's response to it.
    ///
    /// Buffered seat logs are flushed first as `log` actions. The state is
    /// updated before responses are checked and is not rolled back when a
    /// response turns out to be illegal.
    pub fn do_action(&mut self, action: Action) -> RefereeResult<Responses> {
        if !action.is_log() {
            self.flush_logs()?;
        }

        debug!(
            action_type = %action.action_type(),
            actor = ?action.actor(),
            "dispatching action"
        );
        self.update_state(&action)?;

        if let Some(observer) = self.observer.as_mut() {
            observer(&action);
        }

        let responses = self.collect_responses(&action);
        for (seat, response) in responses.iter().enumerate() {
            trace!(seat, response = ?response, "seat responded");
        }
        self.state.previous_action = Some(action.clone());

        if let Err(err) = validation::validate_responses(&self.players, &responses, &action) {
            warn!(seat = ?err.player, reason = %err.reason, "rejected response");
            return Err(err.into());
        }
        Ok(responses)
    }

    fn flush_logs(&mut self) -> RefereeResult<()> {
        for seat in 0..NUM_PLAYERS {
            let text = self.players[seat].log_text().to_string();
            if !text.is_empty() {
                self.do_action(Action::Log {
                    actor: Some(seat),
                    text,
                })?;
                self.players[seat].clear_log();
            }
        }
        Ok(())
    }

    /// Apply `action` to the table and tell every seat its view of it.
    pub fn update_state(&mut self, action: &Action) -> RefereeResult<()> {
        self.state.apply_action(action)?;
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.update_state(&action_in_view(action, seat));
        }
        Ok(())
    }

    /// Each seat answers its own view only; no seat sees another's answer.
    #[cfg(not(feature = "parallel"))]
    fn collect_responses(&mut self, action: &Action) -> Responses {
        let players = &mut self.players;
        std::array::from_fn(|seat| players[seat].respond_to_action(&action_in_view(action, seat)))
    }

    #[cfg(feature = "parallel")]
    fn collect_responses(&mut self, action: &Action) -> Responses {
        use rayon::prelude::*;

        let mut responses: Vec<Option<Response>> = self
            .players
            .as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .map(|(seat, player)| player.respond_to_action(&action_in_view(action, seat)))
            .collect();
        std::array::from_fn(|seat| responses[seat].take())
    }

    /// Scoring request for a `hora` action that has been dispatched.
    pub fn hora_request(
        &self,
        action: &Action,
        flags: SituationalFlags,
    ) -> RefereeResult<HoraRequest> {
        let actor = action
            .actor()
            .filter(|&a| a < NUM_PLAYERS)
            .ok_or_else(|| RefereeError::invalid_state("hora without a valid actor"))?;
        HoraRequest::build(&self.state, self.players[actor].as_ref(), action, flags)
    }

    /// Seats ordered by score, highest first. Ties go to the seat closer to
    /// chicha in turn order.
    pub fn ranked_players(&self) -> RefereeResult<[usize; NUM_PLAYERS]> {
        let chicha = self
            .state
            .chicha
            .ok_or_else(|| RefereeError::invalid_state("ranking requested before the first kyoku"))?;
        let mut seats: [usize; NUM_PLAYERS] = std::array::from_fn(|i| i);
        seats.sort_by_key(|&seat| {
            (
                Reverse(self.players[seat].score()),
                (NUM_PLAYERS + seat - chicha) % NUM_PLAYERS,
            )
        });
        Ok(seats)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn players(&self) -> &[Box<dyn Player>; NUM_PLAYERS] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> &dyn Player {
        self.players[seat].as_ref()
    }

    pub fn rule(&self) -> &GameRule {
        &self.state.rule
    }

    pub fn bakaze(&self) -> Option<Wind> {
        self.state.bakaze
    }

    pub fn oya(&self) -> Option<usize> {
        self.state.oya
    }

    pub fn honba(&self) -> Option<u8> {
        self.state.honba
    }

    pub fn dora_markers(&self) -> &[Pai] {
        &self.state.dora_markers
    }

    pub fn doras(&self) -> Vec<Pai> {
        self.state.doras()
    }

    pub fn num_pipais(&self) -> Option<u32> {
        self.state.num_pipais
    }

    pub fn current_action(&self) -> Option<&Action> {
        self.state.current_action.as_ref()
    }

    pub fn previous_action(&self) -> Option<&Action> {
        self.state.previous_action.as_ref()
    }
}
