use crate::action::Action;
use crate::rule::GameRule;
use crate::tile::Pai;
use crate::types::{Wind, NUM_PLAYERS};

pub mod event_handler;
pub use event_handler::GameStateEventHandler;

/// Tiles in each starting hand.
pub const HAND_SIZE: usize = 13;

/// Tiles set aside for rinshan draws and dora indicators.
pub const DEAD_WALL_SIZE: usize = 14;

/// Shared table state. Only [`GameStateEventHandler::apply_action`] changes it.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub rule: GameRule,
    /// Every tile in play, built on `start_game`.
    pub all_pais: Vec<Pai>,

    pub bakaze: Option<Wind>,
    pub kyoku_num: Option<u8>,
    pub honba: Option<u8>,
    pub kyotaku: Option<u8>,
    /// Dealer of the first kyoku; never changes once set.
    pub chicha: Option<usize>,
    pub oya: Option<usize>,

    pub dora_markers: Vec<Pai>,
    /// Draws left in the live wall.
    pub num_pipais: Option<u32>,

    pub current_action: Option<Action>,
    pub previous_action: Option<Action>,
    /// Actor of the most recent action that had one.
    pub last_actor: Option<usize>,
}

impl GameState {
    pub fn new(rule: GameRule) -> Self {
        Self {
            rule,
            ..Self::default()
        }
    }

    /// Live wall size right after the deal.
    pub fn initial_pipais(&self) -> u32 {
        self.all_pais
            .len()
            .saturating_sub(HAND_SIZE * NUM_PLAYERS + DEAD_WALL_SIZE) as u32
    }

    /// Dora indicated by the revealed markers.
    pub fn doras(&self) -> Vec<Pai> {
        self.dora_markers.iter().map(Pai::succ).collect()
    }

    /// No draws left in the live wall (haitei has been drawn).
    pub fn is_wall_exhausted(&self) -> bool {
        self.num_pipais == Some(0)
    }
}
