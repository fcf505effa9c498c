//! Battle lifecycle: phase rules, turn alternation, and the move loop.

pub mod phase;
pub mod session;
pub mod types;

pub use phase::allowed_actions;
pub use session::{roll_damage, BattleSession};
pub use types::{BattleAction, BattlePhase, BattleState, Side, TurnOutcome};
