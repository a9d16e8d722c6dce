//! Shared seats, walls and scorers for the integration tests.

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{fmt, EnvFilter};

use mjai_arena::{Agent, DecisionPolicy, SeatState, TsumogiriPolicy, Wall};
use mjai_engine::{
    Action, GameRule, HoraPoints, HoraRequest, Pai, Player, RefereeResult, Response, Scorer,
};

/// Test logging, level from `TEST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("TEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init();
}

pub fn pais(s: &str) -> Vec<Pai> {
    s.split_whitespace().map(Pai::parse).collect()
}

pub fn seat<P: DecisionPolicy + 'static>(rule: GameRule, policy: P) -> Box<dyn Player> {
    Box::new(Agent::new(rule, policy))
}

pub fn tsumogiri_table(rule: GameRule) -> [Box<dyn Player>; 4] {
    std::array::from_fn(|_| seat(rule, TsumogiriPolicy))
}

/// A wall dealing `hands` (seat order, oya 0) followed by `draws`; the rest
/// of the set fills the wall in sorted order.
pub fn stacked_wall(rule: &GameRule, hands: [&str; 4], draws: &str) -> Wall {
    let mut pool = Pai::all_pais(rule);
    let mut take = |pai: Pai| {
        let idx = pool
            .iter()
            .position(|p| *p == pai)
            .unwrap_or_else(|| panic!("no {pai} left for the stacked wall"));
        pool.remove(idx)
    };
    let mut tiles = Vec::new();
    for hand in hands {
        tiles.extend(pais(hand).into_iter().map(&mut take));
    }
    tiles.extend(pais(draws).into_iter().map(&mut take));
    tiles.extend(pool);
    Wall::from_tiles(tiles).unwrap()
}

fn hora(actor: usize, target: usize, pai: Pai) -> Response {
    Action::Hora {
        actor,
        target,
        pai,
        uradora_markers: None,
        deltas: None,
        scores: None,
    }
}

/// Discard after a call or a reach declaration.
fn discard_any(seat: &SeatState, me: usize) -> Option<Response> {
    let pai = *seat.possible_dahais().first()?;
    let tehais = seat.tehais();
    let rest = &tehais[..tehais.len().saturating_sub(1)];
    let tsumogiri = matches!(seat.last_action(), Some(Action::Reach { .. })) && !rest.contains(&pai);
    Some(Action::Dahai {
        actor: me,
        pai,
        tsumogiri,
    })
}

/// Wins whenever the shape allows; otherwise reaches, calls and kans at
/// random, driven by `seed`.
pub fn eager(seed: u64) -> impl FnMut(&SeatState, &Action) -> Option<Response> + Send {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    move |seat: &SeatState, action: &Action| {
        let me = seat.id()?;
        match action {
            Action::Tsumo { actor, .. } if *actor == me => {
                let drawn = seat.tsumo_pai()?;
                if seat.can_hora() {
                    return Some(hora(me, me, drawn));
                }
                if seat.can_reach() && rng.random_bool(0.5) {
                    return Some(Action::Reach { actor: me });
                }
                if rng.random_bool(0.5) {
                    if let Some(kan) = seat.possible_furo_actions().into_iter().next() {
                        return Some(kan);
                    }
                }
                Some(Action::Dahai {
                    actor: me,
                    pai: drawn,
                    tsumogiri: true,
                })
            }
            Action::Dahai { actor, pai, .. } if *actor != me => {
                if seat.can_hora() {
                    return Some(hora(me, *actor, *pai));
                }
                let calls = seat.possible_furo_actions();
                if calls.is_empty() || !rng.random_bool(0.3) {
                    return None;
                }
                calls.get(rng.random_range(0..calls.len())).cloned()
            }
            Action::Kakan { actor, pai, .. } if *actor != me && seat.can_hora() => {
                Some(hora(me, *actor, *pai))
            }
            Action::Chi { actor, .. } | Action::Pon { actor, .. } | Action::Reach { actor }
                if *actor == me =>
            {
                discard_any(seat, me)
            }
            _ => None,
        }
    }
}

/// Prices every hand the same.
pub struct FixedScorer(pub i32);

impl Scorer for FixedScorer {
    fn score(&self, _request: &HoraRequest) -> RefereeResult<HoraPoints> {
        Ok(HoraPoints {
            fu: 30,
            fan: 4,
            points: self.0,
            yakus: vec![("menzenchin_tsumoho".to_string(), 1)],
        })
    }
}
