//! Gem economy: AI victory rewards, PvP theft, and reward validation.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::{GemReward, GemRewardBreakdown, GemSource, GemTheftResult};
