//! Scoring hand-off for a win declaration.
//!
//! The referee does not score hands. It assembles a [`HoraRequest`] from the
//! table state and the winner's seat, and a [`Scorer`] supplied by the
//! caller turns that into points.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::errors::{RefereeError, RefereeResult};
use crate::player::Player;
use crate::state::GameState;
use crate::tile::Pai;
use crate::types::{Furo, Wind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoraType {
    Tsumo,
    Ron,
}

/// Conditions the referee cannot know on its own. An upstream tracker
/// supplies them; they default to "did not happen".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SituationalFlags {
    pub ippatsu: bool,
    pub rinshan: bool,
    pub chankan: bool,
    pub double_reach: bool,
    pub first_turn: bool,
    pub uradora_markers: Vec<Pai>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoraRequest {
    /// Concealed tiles without the winning tile.
    pub tehais: Vec<Pai>,
    pub furos: Vec<Furo>,
    pub taken: Pai,
    pub hora_type: HoraType,
    pub oya: bool,
    pub bakaze: Wind,
    pub jikaze: Wind,
    pub doras: Vec<Pai>,
    pub uradoras: Vec<Pai>,
    pub reach: bool,
    pub double_reach: bool,
    pub ippatsu: bool,
    pub rinshan: bool,
    /// Won on the last tile of the wall.
    pub haitei: bool,
    pub first_turn: bool,
    pub chankan: bool,
}

impl HoraRequest {
    /// Build the request for `action`, which must be a `hora` by `player`.
    pub fn build(
        state: &GameState,
        player: &dyn Player,
        action: &Action,
        flags: SituationalFlags,
    ) -> RefereeResult<HoraRequest> {
        let Action::Hora {
            actor, target, pai, ..
        } = action
        else {
            return Err(RefereeError::invalid_state(format!(
                "hora request built from a {} action",
                action.action_type()
            )));
        };
        let (bakaze, oya) = match (state.bakaze, state.oya) {
            (Some(bakaze), Some(oya)) => (bakaze, oya),
            _ => {
                return Err(RefereeError::invalid_state(
                    "hora request outside of a kyoku",
                ))
            }
        };

        let hora_type = if actor == target {
            HoraType::Tsumo
        } else {
            HoraType::Ron
        };
        let tehais = player.tehais();
        let tehais = match hora_type {
            // The drawn tile is already in hand and sits last.
            HoraType::Tsumo => tehais[..tehais.len().saturating_sub(1)].to_vec(),
            HoraType::Ron => tehais.to_vec(),
        };

        Ok(HoraRequest {
            tehais,
            furos: player.furos().to_vec(),
            taken: *pai,
            hora_type,
            oya: *actor == oya,
            bakaze,
            jikaze: player
                .jikaze()
                .unwrap_or_else(|| Wind::of_seat(*actor, oya)),
            doras: state.doras(),
            uradoras: flags.uradora_markers.iter().map(Pai::succ).collect(),
            reach: player.is_reach(),
            double_reach: flags.double_reach,
            ippatsu: flags.ippatsu,
            rinshan: flags.rinshan,
            haitei: state.is_wall_exhausted(),
            first_turn: flags.first_turn,
            chankan: flags.chankan,
        })
    }
}

/// Points as computed by an external scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoraPoints {
    pub fu: u32,
    pub fan: u32,
    pub points: i32,
    /// Yaku name and fan value.
    pub yakus: Vec<(String, u32)>,
}

/// The external scoring collaborator.
pub trait Scorer {
    fn score(&self, request: &HoraRequest) -> RefereeResult<HoraPoints>;
}
