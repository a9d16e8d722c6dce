//! Response legality.
//!
//! Two checks per seat: whether a response of that type may be sent at all
//! for the action just broadcast, and whether its content agrees with the
//! seat's actual hand.

use crate::action::{Action, ActionType, Response};
use crate::errors::ValidationError;
use crate::player::Player;
use crate::tile::Pai;
use crate::types::NUM_PLAYERS;

/// What a seat may answer to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// No response allowed.
    Nothing,
    /// A response of one of these types is mandatory.
    OneOf(&'static [ActionType]),
    /// Pass, or respond with one of these types.
    NothingOr(&'static [ActionType]),
}

impl Expectation {
    pub fn permits(&self, response: Option<ActionType>) -> bool {
        match (self, response) {
            (Expectation::Nothing, None) | (Expectation::NothingOr(_), None) => true,
            (Expectation::Nothing, Some(_)) | (Expectation::OneOf(_), None) => false,
            (Expectation::OneOf(types), Some(t)) | (Expectation::NothingOr(types), Some(t)) => {
                types.contains(&t)
            }
        }
    }
}

const AFTER_OWN_TSUMO: &[ActionType] = &[
    ActionType::Dahai,
    ActionType::Reach,
    ActionType::Ankan,
    ActionType::Kakan,
    ActionType::Hora,
];
const AFTER_OTHERS_DAHAI: &[ActionType] = &[
    ActionType::Chi,
    ActionType::Pon,
    ActionType::Daiminkan,
    ActionType::Hora,
];
const DISCARD_ONLY: &[ActionType] = &[ActionType::Dahai];
const CHANKAN: &[ActionType] = &[ActionType::Hora];

/// The response table, keyed by action type and whether the seat is the actor.
pub fn expected_response(action_type: ActionType, is_actor: bool) -> Expectation {
    use ActionType::*;
    match (action_type, is_actor) {
        (StartGame | StartKyoku | EndKyoku | EndGame | Error | Hora | Ryukyoku | Dora
        | ReachAccepted, _) => Expectation::Nothing,
        (Tsumo, true) => Expectation::OneOf(AFTER_OWN_TSUMO),
        (Tsumo, false) => Expectation::Nothing,
        (Dahai, true) => Expectation::Nothing,
        (Dahai, false) => Expectation::NothingOr(AFTER_OTHERS_DAHAI),
        (Chi | Pon | Reach, true) => Expectation::OneOf(DISCARD_ONLY),
        (Chi | Pon | Reach, false) => Expectation::Nothing,
        // The kan declarer waits for the rinshan draw.
        (Ankan | Daiminkan, _) => Expectation::Nothing,
        (Kakan, true) => Expectation::Nothing,
        (Kakan, false) => Expectation::NothingOr(CHANKAN),
        (Log, _) => Expectation::Nothing,
    }
}

/// Validate one response per seat; the first failure wins.
pub fn validate_responses(
    players: &[Box<dyn Player>; NUM_PLAYERS],
    responses: &[Option<Response>; NUM_PLAYERS],
    action: &Action,
) -> Result<(), ValidationError> {
    for (seat, response) in responses.iter().enumerate() {
        validate_seat(seat, players[seat].as_ref(), response.as_ref(), action)
            .map_err(|err| err.at_seat(seat, response.clone()))?;
    }
    Ok(())
}

fn validate_seat(
    seat: usize,
    player: &dyn Player,
    response: Option<&Response>,
    action: &Action,
) -> Result<(), ValidationError> {
    if let Some(r) = response {
        ensure(r.actor() == Some(seat), "Invalid actor.")?;
    }
    validate_response_type(seat, response, action)?;
    match response {
        Some(r) => validate_response_content(player, r, action),
        None => Ok(()),
    }
}

pub fn validate_response_type(
    seat: usize,
    response: Option<&Response>,
    action: &Action,
) -> Result<(), ValidationError> {
    // A seat reporting its own failure is rejected with its message.
    if let Some(Action::Error { message, .. }) = response {
        return Err(ValidationError::new(message.clone()));
    }
    let is_actor = action.actor() == Some(seat);
    let response_type = response.map(Action::action_type);
    if expected_response(action.action_type(), is_actor).permits(response_type) {
        Ok(())
    } else {
        Err(ValidationError::new(format!(
            "Unexpected response type '{}' for {}.",
            response_type.map_or("none", ActionType::as_str),
            action
        )))
    }
}

pub fn validate_response_content(
    player: &dyn Player,
    response: &Response,
    action: &Action,
) -> Result<(), ValidationError> {
    match response {
        Action::Dahai { pai, tsumogiri, .. } => {
            ensure(player.possible_dahais().contains(pai), "Cannot dahai this pai.")?;
            match action.action_type() {
                ActionType::Tsumo | ActionType::Reach => {
                    let tehais = player.tehais();
                    let (tsumo_pai, rest) = match tehais.split_last() {
                        Some((last, rest)) => (Some(last), rest),
                        None => (None, tehais),
                    };
                    if *tsumogiri {
                        ensure(
                            tsumo_pai == Some(pai),
                            format!(
                                "tsumogiri is true but the pai is not tsumo pai: {} != {}",
                                pai,
                                describe(tsumo_pai)
                            ),
                        )
                    } else {
                        ensure(
                            rest.contains(pai),
                            "tsumogiri is false but the pai is not in tehais.",
                        )
                    }
                }
                _ => ensure(!*tsumogiri, "tsumogiri must be false on dahai after furo."),
            }
        }
        Action::Chi { target, .. } | Action::Pon { target, .. } | Action::Daiminkan { target, .. } => {
            ensure_target(*target, action)?;
            ensure_furo_allowed(player, response)
        }
        Action::Ankan { .. } | Action::Kakan { .. } => ensure_furo_allowed(player, response),
        Action::Reach { .. } => ensure(player.can_reach(), "Cannot reach."),
        Action::Hora {
            actor, target, pai, ..
        } => {
            ensure_target(*target, action)?;
            if actor == target {
                let tsumo_pai = player.tehais().last();
                ensure(
                    tsumo_pai == Some(pai),
                    format!("pai is not tsumo pai: {} != {}", pai, describe(tsumo_pai)),
                )?;
            } else {
                let discarded = action.pai();
                ensure(
                    discarded == Some(*pai),
                    format!(
                        "pai is not previous dahai: {} != {}",
                        pai,
                        describe(discarded.as_ref())
                    ),
                )?;
            }
            ensure(player.can_hora(), "Cannot hora.")
        }
        Action::StartGame { .. }
        | Action::StartKyoku { .. }
        | Action::Tsumo { .. }
        | Action::ReachAccepted { .. }
        | Action::Ryukyoku { .. }
        | Action::Dora { .. }
        | Action::EndKyoku
        | Action::EndGame
        | Action::Log { .. }
        | Action::Error { .. } => Ok(()),
    }
}

fn ensure_target(target: usize, action: &Action) -> Result<(), ValidationError> {
    ensure(
        Some(target) == action.actor(),
        format!(
            "target must be {}.",
            action.actor().map_or_else(|| "none".to_string(), |a| a.to_string())
        ),
    )
}

/// Type, tile and consumed set, the identity used to match melds.
fn furo_signature(action: &Action) -> (ActionType, Option<Pai>, Vec<Pai>) {
    let mut consumed = action.consumed().map(<[Pai]>::to_vec).unwrap_or_default();
    consumed.sort();
    (action.action_type(), action.pai(), consumed)
}

fn ensure_furo_allowed(player: &dyn Player, response: &Response) -> Result<(), ValidationError> {
    let declared = furo_signature(response);
    let allowed = player
        .possible_furo_actions()
        .iter()
        .any(|candidate| furo_signature(candidate) == declared);
    ensure(allowed, "The furo is not allowed.")
}

fn ensure(criterion: bool, reason: impl Into<String>) -> Result<(), ValidationError> {
    if criterion {
        Ok(())
    } else {
        Err(ValidationError::new(reason))
    }
}

fn describe(pai: Option<&Pai>) -> String {
    pai.map_or_else(|| "none".to_string(), Pai::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_type_has_a_rule() {
        // Exhaustiveness is checked by the compiler; this pins the table.
        for t in ActionType::ALL {
            for is_actor in [true, false] {
                let rule = expected_response(t, is_actor);
                let requires = matches!(rule, Expectation::OneOf(_));
                let expect_required = is_actor
                    && matches!(
                        t,
                        ActionType::Tsumo | ActionType::Chi | ActionType::Pon | ActionType::Reach
                    );
                assert_eq!(requires, expect_required, "{t} actor={is_actor}");
            }
        }
    }

    #[test]
    fn tsumo_actor_must_act() {
        let rule = expected_response(ActionType::Tsumo, true);
        assert!(!rule.permits(None));
        assert!(rule.permits(Some(ActionType::Dahai)));
        assert!(rule.permits(Some(ActionType::Hora)));
        assert!(!rule.permits(Some(ActionType::Pon)));
    }

    #[test]
    fn dahai_others_may_claim() {
        let rule = expected_response(ActionType::Dahai, false);
        assert!(rule.permits(None));
        assert!(rule.permits(Some(ActionType::Chi)));
        assert!(!rule.permits(Some(ActionType::Dahai)));
        assert_eq!(expected_response(ActionType::Dahai, true), Expectation::Nothing);
    }

    #[test]
    fn kakan_allows_only_chankan() {
        assert!(expected_response(ActionType::Kakan, false).permits(Some(ActionType::Hora)));
        assert!(!expected_response(ActionType::Kakan, false).permits(Some(ActionType::Pon)));
        assert!(!expected_response(ActionType::Kakan, true).permits(Some(ActionType::Hora)));
    }

    #[test]
    fn unexpected_type_names_the_type() {
        let action = Action::Dora { dora_marker: Pai::parse("1m") };
        let response = Action::Reach { actor: 0 };
        let err = validate_response_type(0, Some(&response), &action).unwrap_err();
        assert!(err.reason.starts_with("Unexpected response type 'reach'"), "{}", err.reason);

        let tsumo = Action::Tsumo { actor: 0, pai: Pai::parse("1m") };
        let err = validate_response_type(0, None, &tsumo).unwrap_err();
        assert!(err.reason.contains("'none'"));
    }
}
