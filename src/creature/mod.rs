//! Creature cards, their battle wrappers, and roster queries.

pub mod roster;
pub mod types;

pub use roster::{battle_ready, select_random_opponent};
pub use types::{BattleCreature, Creature, CreatureStatus, Stats};
