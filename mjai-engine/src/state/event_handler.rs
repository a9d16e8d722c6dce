use crate::action::Action;
use crate::errors::{RefereeError, RefereeResult};
use crate::state::GameState;
use crate::tile::Pai;
use crate::types::NUM_PLAYERS;

pub trait GameStateEventHandler {
    /// Advance the shared state by one action.
    ///
    /// Either the whole transition happens or, on error, nothing changes.
    fn apply_action(&mut self, action: &Action) -> RefereeResult<()>;
}

impl GameStateEventHandler for GameState {
    fn apply_action(&mut self, action: &Action) -> RefereeResult<()> {
        match action {
            Action::StartGame { .. } => {
                self.all_pais = Pai::all_pais(&self.rule);
            }
            Action::StartKyoku {
                bakaze,
                kyoku,
                honba,
                kyotaku,
                oya,
                dora_marker,
                tehais,
                ..
            } => {
                if self.all_pais.is_empty() {
                    return Err(RefereeError::invalid_state(
                        "start_kyoku received before start_game",
                    ));
                }
                if *oya >= NUM_PLAYERS {
                    return Err(RefereeError::invalid_state(format!(
                        "start_kyoku with oya {} out of range",
                        oya
                    )));
                }
                if tehais.len() != NUM_PLAYERS {
                    return Err(RefereeError::invalid_state(format!(
                        "start_kyoku with {} tehais",
                        tehais.len()
                    )));
                }
                self.bakaze = Some(*bakaze);
                self.kyoku_num = Some(*kyoku);
                self.honba = Some(*honba);
                self.kyotaku = Some(*kyotaku);
                self.oya = Some(*oya);
                self.chicha.get_or_insert(*oya);
                self.dora_markers = vec![*dora_marker];
                self.num_pipais = Some(self.initial_pipais());
            }
            Action::Tsumo { actor, .. } => match self.num_pipais {
                Some(n) if n > 0 => self.num_pipais = Some(n - 1),
                Some(_) => {
                    return Err(RefereeError::invalid_state(format!(
                        "tsumo by player {} with no tiles left in the wall",
                        actor
                    )))
                }
                None => {
                    return Err(RefereeError::invalid_state(
                        "tsumo received before start_kyoku",
                    ))
                }
            },
            Action::Dora { dora_marker } => {
                self.dora_markers.push(*dora_marker);
            }
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
            | Action::EndKyoku
            | Action::EndGame
            | Action::Log { .. }
            | Action::Error { .. } => {}
        }

        if let Some(actor) = action.actor() {
            self.last_actor = Some(actor);
        }
        self.current_action = Some(action.clone());
        Ok(())
    }
}
