//! Battle difficulty classification from the two creatures' power scores.
//!
//! Two weightings are in use: experience rewards compare plain stat sums,
//! gem rewards weight attack up and HP down. Both go through
//! [`classify_difficulty`] so the tiering itself cannot drift apart.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::balance::{EXPERT_POWER_RATIO, HARD_POWER_RATIO, NORMAL_POWER_RATIO, POWER_EPSILON};
use crate::creature::Stats;

/// Discrete battle difficulty, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    /// All tiers in ascending severity.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Position in the balance tables.
    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
            Difficulty::Expert => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    /// Parses a difficulty label, ignoring case. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    /// Tier for an opponent/player power ratio.
    pub fn from_power_ratio(ratio: f64) -> Self {
        if ratio >= EXPERT_POWER_RATIO {
            Difficulty::Expert
        } else if ratio >= HARD_POWER_RATIO {
            Difficulty::Hard
        } else if ratio >= NORMAL_POWER_RATIO {
            Difficulty::Normal
        } else {
            Difficulty::Easy
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-stat weights for a power score. Speed never counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerWeights {
    pub attack: f64,
    pub defense: f64,
    pub hp: f64,
}

impl PowerWeights {
    /// Plain `attack + defense + hp`, used for experience.
    pub const UNWEIGHTED: PowerWeights = PowerWeights {
        attack: 1.0,
        defense: 1.0,
        hp: 1.0,
    };

    /// `attack*1.2 + defense*1.0 + hp*0.8`, used for gems.
    pub const WEIGHTED: PowerWeights = PowerWeights {
        attack: 1.2,
        defense: 1.0,
        hp: 0.8,
    };
}

/// Power score of a creature. Missing stats use the card fallback.
pub fn power_score(stats: Option<&Stats>, weights: &PowerWeights) -> f64 {
    let stats = stats.copied().unwrap_or_else(Stats::fallback);
    stats.attack as f64 * weights.attack
        + stats.defense as f64 * weights.defense
        + stats.hp as f64 * weights.hp
}

/// Classifies a matchup by comparing the opponent's power to the player's.
///
/// A powerless player facing a powerless opponent is an easy fight; facing
/// anything stronger it is expert.
pub fn classify_difficulty(
    player: Option<&Stats>,
    opponent: Option<&Stats>,
    weights: &PowerWeights,
) -> Difficulty {
    let player_power = power_score(player, weights);
    let opponent_power = power_score(opponent, weights);

    if player_power <= POWER_EPSILON {
        return if opponent_power <= POWER_EPSILON {
            Difficulty::Easy
        } else {
            Difficulty::Expert
        };
    }

    Difficulty::from_power_ratio(opponent_power / player_power)
}

/// Difficulty used for experience rewards (unweighted stat sums).
pub fn determine_battle_difficulty(player: Option<&Stats>, opponent: Option<&Stats>) -> Difficulty {
    classify_difficulty(player, opponent, &PowerWeights::UNWEIGHTED)
}

/// Difficulty used for gem rewards (weighted power scores).
pub fn determine_battle_difficulty_for_gems(
    player: Option<&Stats>,
    opponent: Option<&Stats>,
) -> Difficulty {
    classify_difficulty(player, opponent, &PowerWeights::WEIGHTED)
}
