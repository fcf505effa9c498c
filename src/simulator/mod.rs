//! Battle balance simulator for Monte Carlo analysis.
//!
//! Fight thousands of seeded battles to analyze:
//! - XP pacing and level-up rates
//! - Gem income from AI rewards and PvP theft
//! - How often each difficulty tier comes up

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{BattleRecord, SimReport};
pub use runner::{generate_roster, run_simulation};
