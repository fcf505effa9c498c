//! Experience gain and the level curve.
//!
//! The curve is geometric: level L needs `floor(100 * 1.5^(L-1))` XP to
//! reach L+1. Everything that converts between total XP and levels walks the
//! same curve through [`check_level_up`], so the conversions always agree.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::balance::*;
use crate::difficulty::Difficulty;

/// Breakdown of the XP earned from one battle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceCalculation {
    pub base_experience: u32,
    pub difficulty_multiplier: f64,
    pub victory_bonus: u32,
    pub total_experience: u64,
}

/// Where a creature sits on the level curve after gaining XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgression {
    pub current_level: u32,
    /// XP accumulated inside `current_level`.
    pub current_experience: u64,
    /// XP still missing for the next level. Zero at the level cap.
    pub experience_to_next_level: u64,
    pub experience_gained: u64,
    pub leveled_up: bool,
}

/// XP multiplier for a difficulty tier.
pub fn experience_multiplier(difficulty: Difficulty) -> f64 {
    XP_DIFFICULTY_MULTIPLIERS[difficulty.index()]
}

/// XP earned from a battle against an opponent of `opponent_level`.
pub fn calculate_experience(
    opponent_level: u32,
    difficulty: Difficulty,
    is_victory: bool,
) -> ExperienceCalculation {
    build_calculation(opponent_level, experience_multiplier(difficulty), is_victory)
}

/// Same as [`calculate_experience`], but from a difficulty label.
/// Unrecognised labels use a neutral 1.0 multiplier.
pub fn calculate_experience_for_label(
    opponent_level: u32,
    difficulty: &str,
    is_victory: bool,
) -> ExperienceCalculation {
    let multiplier = Difficulty::from_label(difficulty)
        .map_or(XP_FALLBACK_MULTIPLIER, experience_multiplier);
    build_calculation(opponent_level, multiplier, is_victory)
}

fn build_calculation(
    opponent_level: u32,
    difficulty_multiplier: f64,
    is_victory: bool,
) -> ExperienceCalculation {
    let base_experience =
        BATTLE_XP_BASE.saturating_add(opponent_level.saturating_mul(BATTLE_XP_PER_OPPONENT_LEVEL));
    let victory_bonus = if is_victory { VICTORY_XP_BONUS } else { 0 };
    let total = base_experience as f64 * difficulty_multiplier + victory_bonus as f64;

    ExperienceCalculation {
        base_experience,
        difficulty_multiplier,
        victory_bonus,
        total_experience: total.floor() as u64,
    }
}

/// XP needed to advance from `level` to `level + 1`.
pub fn experience_required_for_level(level: u32) -> u64 {
    let exponent = level.clamp(1, MAX_CREATURE_LEVEL) - 1;
    (XP_CURVE_BASE * XP_CURVE_GROWTH.powi(exponent as i32)).floor() as u64
}

/// Total XP a fresh creature must earn to reach `level`.
pub fn total_experience_for_level(level: u32) -> u64 {
    (1..level.clamp(1, MAX_CREATURE_LEVEL))
        .map(experience_required_for_level)
        .fold(0u64, u64::saturating_add)
}

/// Adds `experience_gained` to a creature's in-level XP and processes level-ups.
///
/// Levels are gained one at a time, each consuming its own requirement,
/// until the remainder no longer covers the next one or the cap is reached.
pub fn check_level_up(
    current_level: u32,
    current_experience: u64,
    experience_gained: u64,
) -> LevelProgression {
    let starting_level = current_level.clamp(1, MAX_CREATURE_LEVEL);
    let mut level = starting_level;
    let mut remaining = current_experience.saturating_add(experience_gained);

    while level < MAX_CREATURE_LEVEL {
        let required = experience_required_for_level(level);
        if remaining < required {
            break;
        }
        remaining -= required;
        level += 1;
    }

    let experience_to_next_level = if level >= MAX_CREATURE_LEVEL {
        0
    } else {
        experience_required_for_level(level) - remaining
    };

    let leveled_up = level > starting_level;
    if leveled_up {
        debug!(from = starting_level, to = level, "creature leveled up");
    }

    LevelProgression {
        current_level: level,
        current_experience: remaining,
        experience_to_next_level,
        experience_gained,
        leveled_up,
    }
}

/// Level reached by a fresh creature holding `total_experience`.
pub fn get_level_from_experience(total_experience: u64) -> u32 {
    check_level_up(1, 0, total_experience).current_level
}

/// XP accumulated inside `current_level` for a creature with `total_experience`.
pub fn get_experience_in_current_level(total_experience: u64, current_level: u32) -> u64 {
    total_experience.saturating_sub(total_experience_for_level(current_level))
}

/// Progress through the current level as a percentage (0-100).
pub fn level_progress_percent(progression: &LevelProgression) -> f64 {
    if progression.experience_to_next_level == 0 {
        return 100.0;
    }
    let required = experience_required_for_level(progression.current_level);
    (progression.current_experience as f64 / required as f64 * 100.0).min(100.0)
}
