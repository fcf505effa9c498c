use serde::{Deserialize, Serialize};

/// Where a gem reward came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GemSource {
    Victory,
    Theft,
}

/// Gems earned for beating an AI opponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GemReward {
    /// Opponent-level base after the difficulty multiplier.
    pub base_reward: u32,
    pub difficulty_multiplier: f64,
    pub level_multiplier: f64,
    pub total_earned: u32,
    pub source: GemSource,
}

/// Gems taken from the loser of a PvP battle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GemTheftResult {
    pub base_theft: u64,
    pub level_multiplier: f64,
    pub difficulty_multiplier: f64,
    /// Amount after multipliers, before the floor and cap.
    pub difficulty_adjusted: u64,
    pub actual_stolen: u64,
    pub source: GemSource,
}

/// Combined gem outcome of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GemRewardBreakdown {
    pub victory_gems: u32,
    pub stolen_gems: u64,
    pub total_gems: u32,
    pub reward: Option<GemReward>,
    pub theft: Option<GemTheftResult>,
}
