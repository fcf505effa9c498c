//! Simulation configuration.

/// Configuration for a batch of simulated battles.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of battles to fight
    pub num_battles: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Number of creatures in the generated roster
    pub roster_size: usize,

    /// Share of battles fought as PvP, 0-100
    pub pvp_percent: u32,

    /// Trainer level used for gem rewards
    pub trainer_level: u32,

    /// Upper bound on rounds per battle before it is abandoned
    pub max_rounds_per_battle: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_battles: 1000,
            seed: None,
            roster_size: 12,
            pvp_percent: 25,
            trainer_level: 1,
            max_rounds_per_battle: 200,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking the AI reward curve
    pub fn ai_only(num_battles: u32) -> Self {
        Self {
            num_battles,
            pvp_percent: 0,
            ..Default::default()
        }
    }

    /// Quick config for checking gem theft
    pub fn pvp_only(num_battles: u32) -> Self {
        Self {
            num_battles,
            pvp_percent: 100,
            ..Default::default()
        }
    }
}
