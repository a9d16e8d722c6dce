//! Keeps every action the referee dispatches, in order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mjai_engine::action::Action;
use mjai_engine::errors::RefereeResult;
use mjai_engine::game::ActionObserver;

#[derive(Debug, Clone, Default)]
pub struct ActionRecorder {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl ActionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer that appends to this recorder. Clones share the log.
    pub fn observer(&self) -> ActionObserver {
        let sink = Arc::clone(&self.actions);
        Box::new(move |action: &Action| lock(&sink).push(action.clone()))
    }

    pub fn actions(&self) -> Vec<Action> {
        lock(&self.actions).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.actions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One MJAI message per line.
    pub fn to_json_lines(&self) -> RefereeResult<String> {
        let mut out = String::new();
        for action in lock(&self.actions).iter() {
            out.push_str(&serde_json::to_string(action)?);
            out.push('\n');
        }
        Ok(out)
    }
}

fn lock(actions: &Mutex<Vec<Action>>) -> MutexGuard<'_, Vec<Action>> {
    actions.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mjai_engine::tile::Pai;

    #[test]
    fn records_through_observer() {
        let recorder = ActionRecorder::new();
        let mut observer = recorder.observer();
        observer(&Action::StartGame {
            id: None,
            names: None,
        });
        observer(&Action::Dora {
            dora_marker: Pai::parse("5sr"),
        });
        assert_eq!(recorder.len(), 2);
        assert_eq!(
            recorder.to_json_lines().unwrap(),
            "{\"type\":\"start_game\"}\n{\"type\":\"dora\",\"dora_marker\":\"5sr\"}\n"
        );
    }
}
