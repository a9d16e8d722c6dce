//! Drives one kyoku through the referee, from the deal to `end_kyoku`.
//!
//! The runner plays the table's part: it draws from the [`Wall`], forwards
//! each seat's answer back into [`Game::do_action`] and settles claims.
//! Every answer it acts on has already passed the referee's validation.

use tracing::{debug, info};

use mjai_engine::action::{Action, ActionType, Response};
use mjai_engine::errors::{RefereeError, RefereeResult};
use mjai_engine::game::{Game, Responses};
use mjai_engine::hora::{HoraRequest, Scorer, SituationalFlags};
use mjai_engine::types::{Wind, NUM_PLAYERS};

use crate::hand;
use crate::wall::Wall;

/// Paid by noten seats to tenpai seats on an exhaustive draw.
const TENPAI_PAYMENT: i32 = 3000;
const HONBA_RON: i32 = 300;
const HONBA_TSUMO_EACH: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KyokuSetup {
    pub bakaze: Wind,
    pub kyoku: u8,
    pub honba: u8,
    /// Reach deposits left on the table from earlier kyokus.
    pub kyotaku: u8,
    pub oya: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KyokuOutcome {
    Hora {
        actor: usize,
        target: usize,
        request: HoraRequest,
        /// Set when a scorer priced the hand.
        deltas: Option<[i32; NUM_PLAYERS]>,
    },
    Ryukyoku {
        tenpai: [bool; NUM_PLAYERS],
        deltas: [i32; NUM_PLAYERS],
    },
}

impl KyokuOutcome {
    /// The dealer keeps the seat.
    pub fn is_renchan(&self, oya: usize) -> bool {
        match self {
            KyokuOutcome::Hora { actor, .. } => *actor == oya,
            KyokuOutcome::Ryukyoku { tenpai, .. } => tenpai[oya],
        }
    }
}

enum Turn {
    Draw { actor: usize, rinshan: bool },
    Discard { dahai: Action, reach: bool },
    Done(KyokuOutcome),
}

pub struct KyokuRunner<'a> {
    game: &'a mut Game,
    wall: Wall,
    setup: KyokuSetup,
    scorer: Option<&'a dyn Scorer>,
    kyotaku: u8,
    draws: usize,
    called: bool,
    ippatsu: [bool; NUM_PLAYERS],
    double_reach: [bool; NUM_PLAYERS],
}

impl<'a> KyokuRunner<'a> {
    pub fn new(game: &'a mut Game, wall: Wall, setup: KyokuSetup) -> Self {
        Self {
            game,
            wall,
            setup,
            scorer: None,
            kyotaku: setup.kyotaku,
            draws: 0,
            called: false,
            ippatsu: [false; NUM_PLAYERS],
            double_reach: [false; NUM_PLAYERS],
        }
    }

    /// Price wins with `scorer`; without one, hora carries no deltas.
    pub fn with_scorer(mut self, scorer: &'a dyn Scorer) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Deposits on the table; zero after a win.
    pub fn kyotaku(&self) -> u8 {
        self.kyotaku
    }

    pub fn run(&mut self) -> RefereeResult<KyokuOutcome> {
        let KyokuSetup {
            bakaze,
            kyoku,
            honba,
            kyotaku,
            oya,
        } = self.setup;
        info!(%bakaze, kyoku, honba, oya, "kyoku start");

        let dora_marker = self
            .wall
            .dora_markers()
            .first()
            .copied()
            .ok_or_else(|| RefereeError::invalid_state("wall has no dora marker"))?;
        let scores = self.scores();
        self.game.do_action(Action::StartKyoku {
            bakaze,
            kyoku,
            honba,
            kyotaku,
            oya,
            dora_marker,
            scores: Some(scores),
            tehais: self.wall.haipai(oya),
        })?;

        let mut turn = Turn::Draw {
            actor: oya,
            rinshan: false,
        };
        let outcome = loop {
            turn = match turn {
                Turn::Draw { actor, rinshan } => self.draw_turn(actor, rinshan)?,
                Turn::Discard { dahai, reach } => self.discard_turn(dahai, reach)?,
                Turn::Done(outcome) => break outcome,
            };
        };

        self.game.do_action(Action::EndKyoku)?;
        match &outcome {
            KyokuOutcome::Hora { actor, target, .. } => {
                info!(actor, target, "kyoku ended by hora")
            }
            KyokuOutcome::Ryukyoku { tenpai, .. } => {
                info!(?tenpai, "kyoku ended by exhaustive draw")
            }
        }
        Ok(outcome)
    }

    fn draw_turn(&mut self, actor: usize, rinshan: bool) -> RefereeResult<Turn> {
        let drawn = if rinshan {
            self.wall.draw_rinshan()
        } else {
            self.wall.draw()
        };
        let Some(pai) = drawn else {
            return self.exhaustive_draw().map(Turn::Done);
        };
        self.draws += 1;
        let first_go_around = !self.called && self.draws <= NUM_PLAYERS;

        let responses = self.game.do_action(Action::Tsumo { actor, pai })?;
        let response = take_response(responses, actor)?;
        match response.action_type() {
            ActionType::Dahai => Ok(Turn::Discard {
                dahai: response,
                reach: false,
            }),
            ActionType::Reach => {
                self.double_reach[actor] = first_go_around;
                let responses = self.game.do_action(response)?;
                Ok(Turn::Discard {
                    dahai: take_response(responses, actor)?,
                    reach: true,
                })
            }
            ActionType::Hora => {
                let flags = SituationalFlags {
                    rinshan,
                    first_turn: first_go_around,
                    ..self.flags_for(actor)
                };
                self.hora(response, flags).map(Turn::Done)
            }
            ActionType::Ankan => {
                self.game.do_action(response)?;
                self.on_call();
                self.reveal_dora()?;
                Ok(Turn::Draw {
                    actor,
                    rinshan: true,
                })
            }
            ActionType::Kakan => {
                let responses = self.game.do_action(response)?;
                self.on_call();
                if let Some(chankan) = pick_claim(&responses, actor) {
                    let winner = chankan.actor().unwrap_or(actor);
                    let flags = SituationalFlags {
                        chankan: true,
                        ..self.flags_for(winner)
                    };
                    return self.hora(chankan, flags).map(Turn::Done);
                }
                self.reveal_dora()?;
                Ok(Turn::Draw {
                    actor,
                    rinshan: true,
                })
            }
            other => Err(RefereeError::invalid_state(format!(
                "{} is not an answer to tsumo",
                other
            ))),
        }
    }

    fn discard_turn(&mut self, dahai: Action, reach: bool) -> RefereeResult<Turn> {
        let actor = dahai
            .actor()
            .ok_or_else(|| RefereeError::invalid_state("dahai without actor"))?;
        let responses = self.game.do_action(dahai)?;
        if !reach {
            self.ippatsu[actor] = false;
        }

        let claim = pick_claim(&responses, actor);
        if let Some(ron) = claim.as_ref().filter(|c| c.action_type() == ActionType::Hora) {
            let winner = ron.actor().unwrap_or(actor);
            let flags = self.flags_for(winner);
            return self.hora(ron.clone(), flags).map(Turn::Done);
        }
        if reach {
            self.accept_reach(actor)?;
        }

        let Some(call) = claim else {
            return Ok(Turn::Draw {
                actor: (actor + 1) % NUM_PLAYERS,
                rinshan: false,
            });
        };
        let claimer = call
            .actor()
            .ok_or_else(|| RefereeError::invalid_state("call without actor"))?;
        let kind = call.action_type();
        debug!(claimer, %kind, "claim wins");
        let responses = self.game.do_action(call)?;
        self.on_call();
        if kind == ActionType::Daiminkan {
            self.reveal_dora()?;
            return Ok(Turn::Draw {
                actor: claimer,
                rinshan: true,
            });
        }
        Ok(Turn::Discard {
            dahai: take_response(responses, claimer)?,
            reach: false,
        })
    }

    fn accept_reach(&mut self, actor: usize) -> RefereeResult<()> {
        let mut deltas = [0; NUM_PLAYERS];
        deltas[actor] = -self.game.rule().reach_cost;
        let scores = add(self.scores(), deltas);
        self.game.do_action(Action::ReachAccepted {
            actor,
            deltas: Some(deltas),
            scores: Some(scores),
        })?;
        self.kyotaku += 1;
        self.ippatsu[actor] = true;
        Ok(())
    }

    fn on_call(&mut self) {
        self.called = true;
        self.ippatsu = [false; NUM_PLAYERS];
    }

    fn reveal_dora(&mut self) -> RefereeResult<()> {
        if let Some(dora_marker) = self.wall.reveal_dora() {
            self.game.do_action(Action::Dora { dora_marker })?;
        }
        Ok(())
    }

    fn flags_for(&self, seat: usize) -> SituationalFlags {
        SituationalFlags {
            ippatsu: self.ippatsu[seat],
            double_reach: self.double_reach[seat],
            ..SituationalFlags::default()
        }
    }

    fn hora(&mut self, action: Response, mut flags: SituationalFlags) -> RefereeResult<KyokuOutcome> {
        let Action::Hora {
            actor, target, pai, ..
        } = action
        else {
            return Err(RefereeError::invalid_state("expected a hora response"));
        };
        let uradora_markers = if self.game.player(actor).is_reach() {
            self.wall.uradora_markers().to_vec()
        } else {
            Vec::new()
        };
        flags.uradora_markers = uradora_markers.clone();
        let request = self.game.hora_request(&action, flags)?;

        let deltas = match self.scorer {
            Some(scorer) => Some(self.hora_deltas(actor, target, scorer.score(&request)?.points)),
            None => None,
        };
        let scores = deltas.map(|d| add(self.scores(), d));
        self.game.do_action(Action::Hora {
            actor,
            target,
            pai,
            uradora_markers: Some(uradora_markers),
            deltas,
            scores,
        })?;
        self.kyotaku = 0;
        Ok(KyokuOutcome::Hora {
            actor,
            target,
            request,
            deltas,
        })
    }

    fn hora_deltas(&self, actor: usize, target: usize, points: i32) -> [i32; NUM_PLAYERS] {
        let honba = i32::from(self.setup.honba);
        let mut deltas = [0; NUM_PLAYERS];
        if actor == target {
            // Each payer's share rounds up to the next hundred.
            let share = (points + 299) / 300 * 100 + honba * HONBA_TSUMO_EACH;
            for seat in (0..NUM_PLAYERS).filter(|&s| s != actor) {
                deltas[seat] -= share;
                deltas[actor] += share;
            }
        } else {
            let paid = points + honba * HONBA_RON;
            deltas[target] -= paid;
            deltas[actor] += paid;
        }
        deltas[actor] += i32::from(self.kyotaku) * self.game.rule().reach_cost;
        deltas
    }

    fn exhaustive_draw(&mut self) -> RefereeResult<KyokuOutcome> {
        let tenpai: [bool; NUM_PLAYERS] = std::array::from_fn(|seat| {
            hand::is_tenpai(&hand::counts_of(self.game.player(seat).tehais()))
        });
        let num_tenpai = tenpai.iter().filter(|&&t| t).count() as i32;
        let mut deltas = [0; NUM_PLAYERS];
        if num_tenpai > 0 && num_tenpai < NUM_PLAYERS as i32 {
            for (delta, &is_tenpai) in deltas.iter_mut().zip(&tenpai) {
                *delta = if is_tenpai {
                    TENPAI_PAYMENT / num_tenpai
                } else {
                    -TENPAI_PAYMENT / (NUM_PLAYERS as i32 - num_tenpai)
                };
            }
        }
        let scores = add(self.scores(), deltas);
        self.game.do_action(Action::Ryukyoku {
            reason: Some("fanpai".to_string()),
            deltas: Some(deltas),
            scores: Some(scores),
        })?;
        Ok(KyokuOutcome::Ryukyoku { tenpai, deltas })
    }

    fn scores(&self) -> [i32; NUM_PLAYERS] {
        std::array::from_fn(|seat| self.game.player(seat).score())
    }
}

/// The claim that wins over a discard: hora before pon or daiminkan before
/// chi, and the seat nearest the discarder among equals.
pub fn pick_claim(responses: &Responses, discarder: usize) -> Option<Response> {
    let priority = |r: &Response| match r.action_type() {
        ActionType::Hora => Some(0),
        ActionType::Pon | ActionType::Daiminkan => Some(1),
        ActionType::Chi => Some(2),
        _ => None,
    };
    (1..NUM_PLAYERS)
        .map(|k| (discarder + k) % NUM_PLAYERS)
        .filter_map(|seat| responses[seat].as_ref())
        .filter_map(|r| priority(r).map(|p| (p, r)))
        .min_by_key(|(p, _)| *p)
        .map(|(_, r)| r.clone())
}

fn take_response(responses: Responses, seat: usize) -> RefereeResult<Response> {
    responses
        .into_iter()
        .nth(seat)
        .flatten()
        .ok_or_else(|| RefereeError::invalid_state(format!("seat {} gave no answer", seat)))
}

fn add(scores: [i32; NUM_PLAYERS], deltas: [i32; NUM_PLAYERS]) -> [i32; NUM_PLAYERS] {
    std::array::from_fn(|seat| scores[seat] + deltas[seat])
}

#[cfg(test)]
mod tests {
    use super::*;
    use mjai_engine::tile::Pai;

    fn pon(actor: usize) -> Option<Response> {
        Some(Action::Pon {
            actor,
            target: 0,
            pai: Pai::parse("5p"),
            consumed: vec![Pai::parse("5p"), Pai::parse("5p")],
        })
    }

    fn chi(actor: usize) -> Option<Response> {
        Some(Action::Chi {
            actor,
            target: 0,
            pai: Pai::parse("5p"),
            consumed: vec![Pai::parse("4p"), Pai::parse("6p")],
        })
    }

    fn ron(actor: usize) -> Option<Response> {
        Some(Action::Hora {
            actor,
            target: 0,
            pai: Pai::parse("5p"),
            uradora_markers: None,
            deltas: None,
            scores: None,
        })
    }

    #[test]
    fn pon_beats_chi() {
        let responses = [None, chi(1), None, pon(3)];
        assert_eq!(pick_claim(&responses, 0), pon(3));
    }

    #[test]
    fn hora_beats_everything() {
        let responses = [None, chi(1), ron(2), pon(3)];
        assert_eq!(pick_claim(&responses, 0), ron(2));
    }

    #[test]
    fn nearest_ron_wins() {
        let responses = [ron(0), None, ron(2), ron(3)];
        assert_eq!(pick_claim(&responses, 1), ron(2));
        assert_eq!(pick_claim(&responses, 3), ron(0));
    }

    #[test]
    fn no_claims() {
        assert_eq!(pick_claim(&[None, None, None, None], 2), None);
    }

    #[test]
    fn renchan_follows_dealer() {
        let ryukyoku = KyokuOutcome::Ryukyoku {
            tenpai: [false, true, false, false],
            deltas: [-1000, 3000, -1000, -1000],
        };
        assert!(ryukyoku.is_renchan(1));
        assert!(!ryukyoku.is_renchan(0));
    }
}
