//! MJAI Arena
//!
//! Seats and a table driver around the `mjai-engine` referee: per-seat hand
//! tracking, reference policies, deterministic walls and a runner that plays
//! kyokus end to end through `Game::do_action`.

pub mod agent;
pub mod arena;
pub mod hand;
pub mod kyoku;
pub mod recorder;
pub mod seat_state;
pub mod wall;

pub use agent::{Agent, DecisionPolicy, TsumogiriPolicy};
pub use arena::{Arena, GameLength};
pub use kyoku::{KyokuOutcome, KyokuRunner, KyokuSetup};
pub use recorder::ActionRecorder;
pub use seat_state::{ReachState, SeatState};
pub use wall::Wall;
