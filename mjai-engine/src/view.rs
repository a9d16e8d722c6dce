//! Per-seat redaction of broadcast actions.

use crate::action::Action;
use crate::tile::Pai;

/// The copy of `action` that `seat` is allowed to see.
///
/// Other seats' starting hands and drawn tiles become [`Pai::Unknown`];
/// every other action is public and passes through unchanged.
pub fn action_in_view(action: &Action, seat: usize) -> Action {
    match action {
        Action::StartGame { names, .. } => Action::StartGame {
            id: Some(seat),
            names: names.clone(),
        },
        Action::StartKyoku {
            bakaze,
            kyoku,
            honba,
            kyotaku,
            oya,
            dora_marker,
            scores,
            tehais,
        } => Action::StartKyoku {
            bakaze: *bakaze,
            kyoku: *kyoku,
            honba: *honba,
            kyotaku: *kyotaku,
            oya: *oya,
            dora_marker: *dora_marker,
            scores: *scores,
            tehais: tehais
                .iter()
                .enumerate()
                .map(|(i, hand)| {
                    if i == seat {
                        hand.clone()
                    } else {
                        vec![Pai::Unknown; hand.len()]
                    }
                })
                .collect(),
        },
        Action::Tsumo { actor, pai } => Action::Tsumo {
            actor: *actor,
            pai: if *actor == seat { *pai } else { Pai::Unknown },
        },
        Action::Dahai { .. }
        | Action::Chi { .. }
        | Action::Pon { .. }
        | Action::Ankan { .. }
        | Action::Daiminkan { .. }
        | Action::Kakan { .. }
        | Action::Reach { .. }
        | Action::ReachAccepted { .. }
        | Action::Hora { .. }
        | Action::Ryukyoku { .. }
        | Action::Dora { .. }
        | Action::EndKyoku
        | Action::EndGame
        | Action::Log { .. }
        | Action::Error { .. } => action.clone(),
    }
}
