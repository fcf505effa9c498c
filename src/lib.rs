//! Creature Battle - progression and reward engine for pet creature cards
//!
//! Experience and levelling math, stat growth, the gem reward/theft economy,
//! difficulty classification, and the battle phase state machine. Rendering,
//! image generation, and storage backends live outside this crate; the engine
//! only talks to storage through [`persistence::ProgressionStore`].

pub mod balance;
pub mod battle;
pub mod creature;
pub mod difficulty;
pub mod error;
pub mod gems;
pub mod persistence;
pub mod progression;
pub mod rewards;
pub mod simulator;

pub use battle::{BattleAction, BattlePhase, BattleSession, BattleState, Side};
pub use creature::{BattleCreature, Creature, CreatureStatus, Stats};
pub use difficulty::Difficulty;
pub use error::{BattleError, StoreError};
pub use rewards::{settle_battle, BattleRewards, RewardContext};
