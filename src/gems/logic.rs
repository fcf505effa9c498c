//! Gem reward, theft, and validation formulas.

use rand::Rng;
use tracing::debug;

use super::types::{GemReward, GemRewardBreakdown, GemSource, GemTheftResult};
use crate::balance::*;
use crate::difficulty::Difficulty;

/// Gem multiplier for a difficulty tier.
pub fn gem_difficulty_multiplier(difficulty: Difficulty) -> f64 {
    GEM_DIFFICULTY_MULTIPLIERS[difficulty.index()]
}

fn label_multiplier(difficulty: &str) -> f64 {
    Difficulty::from_label(difficulty)
        .map_or(GEM_FALLBACK_DIFFICULTY_MULTIPLIER, gem_difficulty_multiplier)
}

/// Reward multiplier for a trainer level. Levels outside 1-10 use the top multiplier.
pub fn trainer_level_multiplier(trainer_level: u32) -> f64 {
    match trainer_level {
        1..=10 => TRAINER_LEVEL_MULTIPLIERS[(trainer_level - 1) as usize],
        _ => TRAINER_LEVEL_FALLBACK_MULTIPLIER,
    }
}

/// Theft multiplier for a trainer level. Grows without a ceiling.
pub fn theft_level_multiplier(trainer_level: u32) -> f64 {
    1.0 + (trainer_level as f64 - 1.0) * GEM_THEFT_PER_TRAINER_LEVEL
}

/// Gems earned by beating an AI opponent.
pub fn calculate_gem_reward(
    trainer_level: u32,
    difficulty: Difficulty,
    opponent_level: u32,
) -> GemReward {
    build_reward(trainer_level, gem_difficulty_multiplier(difficulty), opponent_level)
}

/// [`calculate_gem_reward`] from a difficulty label; unknown labels use 1.0.
pub fn calculate_gem_reward_for_label(
    trainer_level: u32,
    difficulty: &str,
    opponent_level: u32,
) -> GemReward {
    build_reward(trainer_level, label_multiplier(difficulty), opponent_level)
}

fn build_reward(trainer_level: u32, difficulty_multiplier: f64, opponent_level: u32) -> GemReward {
    let base = GEM_REWARD_BASE
        .saturating_add(opponent_level.saturating_mul(GEM_REWARD_PER_OPPONENT_LEVEL));
    let base_reward = (base as f64 * difficulty_multiplier).floor() as u32;
    let level_multiplier = trainer_level_multiplier(trainer_level);
    let total_earned = (base_reward as f64 * level_multiplier).floor() as u32;

    GemReward {
        base_reward,
        difficulty_multiplier,
        level_multiplier,
        total_earned,
        source: GemSource::Victory,
    }
}

/// Gems stolen from a PvP opponent holding `opponent_gems`.
///
/// A win always takes at least 5 gems and at most 100, but never more than
/// the opponent has. An empty opponent yields nothing.
pub fn calculate_gem_theft(
    opponent_gems: u64,
    trainer_level: u32,
    difficulty: Difficulty,
) -> GemTheftResult {
    build_theft(opponent_gems, trainer_level, gem_difficulty_multiplier(difficulty))
}

/// [`calculate_gem_theft`] from a difficulty label; unknown labels use 1.0.
pub fn calculate_gem_theft_for_label(
    opponent_gems: u64,
    trainer_level: u32,
    difficulty: &str,
) -> GemTheftResult {
    build_theft(opponent_gems, trainer_level, label_multiplier(difficulty))
}

fn build_theft(opponent_gems: u64, trainer_level: u32, difficulty_multiplier: f64) -> GemTheftResult {
    let level_multiplier = theft_level_multiplier(trainer_level);
    if opponent_gems == 0 {
        return GemTheftResult {
            base_theft: 0,
            level_multiplier,
            difficulty_multiplier,
            difficulty_adjusted: 0,
            actual_stolen: 0,
            source: GemSource::Theft,
        };
    }

    let base_theft = (opponent_gems as f64 * GEM_THEFT_RATE).floor() as u64;
    let difficulty_adjusted =
        (base_theft as f64 * level_multiplier * difficulty_multiplier).floor() as u64;

    let cap = MAX_GEM_THEFT_AMOUNT.min(opponent_gems);
    let actual_stolen = difficulty_adjusted.max(MIN_GEM_THEFT_AMOUNT).min(cap);

    if actual_stolen != difficulty_adjusted {
        debug!(
            difficulty_adjusted,
            actual_stolen, opponent_gems, "gem theft clamped"
        );
    }

    GemTheftResult {
        base_theft,
        level_multiplier,
        difficulty_multiplier,
        difficulty_adjusted,
        actual_stolen,
        source: GemSource::Theft,
    }
}

/// Inclusive gem range an AI opponent is generated with.
pub fn ai_gem_range(difficulty: Difficulty) -> (u32, u32) {
    AI_GEM_RANGES[difficulty.index()]
}

/// Rolls the gem pool for an AI opponent.
pub fn generate_ai_gem_reward(difficulty: Difficulty, rng: &mut impl Rng) -> u32 {
    let (low, high) = ai_gem_range(difficulty);
    rng.gen_range(low..=high)
}

/// [`generate_ai_gem_reward`] from a label; unknown labels roll the normal range.
pub fn generate_ai_gem_reward_for_label(difficulty: &str, rng: &mut impl Rng) -> u32 {
    generate_ai_gem_reward(
        Difficulty::from_label(difficulty).unwrap_or(Difficulty::Normal),
        rng,
    )
}

/// Normalizes a gem amount to a whole number in `0..=MAX_GEM_REWARD_AMOUNT`.
pub fn validate_gem_reward(amount: f64) -> u32 {
    validate_gem_reward_with_max(amount, MAX_GEM_REWARD_AMOUNT)
}

/// Normalizes a gem amount to a whole number in `0..=max_allowed`.
///
/// NaN and negatives become 0, anything above the ceiling (including
/// infinity) becomes the ceiling.
pub fn validate_gem_reward_with_max(amount: f64, max_allowed: u32) -> u32 {
    if amount.is_nan() || amount <= 0.0 {
        return 0;
    }
    if amount > max_allowed as f64 {
        return max_allowed;
    }
    amount.floor() as u32
}

/// Gem outcome of a finished battle.
///
/// Defeats earn nothing. PvP victories only steal, AI victories only earn.
pub fn calculate_total_gem_rewards(
    is_victory: bool,
    is_pvp: bool,
    trainer_level: u32,
    difficulty: Difficulty,
    opponent_gems: u64,
    opponent_level: u32,
) -> GemRewardBreakdown {
    if !is_victory {
        return GemRewardBreakdown::default();
    }

    if is_pvp {
        let theft = calculate_gem_theft(opponent_gems, trainer_level, difficulty);
        GemRewardBreakdown {
            victory_gems: 0,
            stolen_gems: theft.actual_stolen,
            total_gems: validate_gem_reward_with_max(
                theft.actual_stolen as f64,
                MAX_GEM_THEFT_AMOUNT as u32,
            ),
            reward: None,
            theft: Some(theft),
        }
    } else {
        let reward = calculate_gem_reward(trainer_level, difficulty, opponent_level);
        GemRewardBreakdown {
            victory_gems: reward.total_earned,
            stolen_gems: 0,
            total_gems: validate_gem_reward(reward.total_earned as f64),
            reward: Some(reward),
            theft: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_gem_reward_hard_level_five() {
        let reward = calculate_gem_reward(5, Difficulty::Hard, 3);
        assert_eq!(reward.base_reward, 20);
        assert_eq!(reward.level_multiplier, 1.4);
        assert_eq!(reward.total_earned, 28);
        assert_eq!(reward.source, GemSource::Victory);
    }

    #[test]
    fn test_gem_reward_non_decreasing_with_difficulty() {
        for opponent_level in [1, 5, 20, 100] {
            let totals: Vec<u32> = Difficulty::ALL
                .iter()
                .map(|d| calculate_gem_reward(3, *d, opponent_level).total_earned)
                .collect();
            assert!(totals.windows(2).all(|w| w[0] <= w[1]), "{:?}", totals);
        }
    }

    #[test]
    fn test_trainer_level_multiplier_table() {
        assert_eq!(trainer_level_multiplier(1), 1.0);
        assert_eq!(trainer_level_multiplier(9), 1.8);
        assert_eq!(trainer_level_multiplier(10), 2.0);
    }

    #[test]
    fn test_out_of_range_trainer_level_uses_top_multiplier() {
        assert_eq!(trainer_level_multiplier(0), 2.0);
        assert_eq!(trainer_level_multiplier(11), 2.0);
        assert_eq!(trainer_level_multiplier(u32::MAX), 2.0);
        assert_eq!(calculate_gem_reward(0, Difficulty::Normal, 0).total_earned, 20);
    }

    #[test]
    fn test_gem_reward_unknown_label() {
        let reward = calculate_gem_reward_for_label(1, "impossible", 5);
        assert_eq!(reward.difficulty_multiplier, 1.0);
        assert_eq!(reward.total_earned, 20);
    }

    #[test]
    fn test_theft_hits_cap() {
        let theft = calculate_gem_theft(1000, 10, Difficulty::Expert);
        assert_eq!(theft.base_theft, 150);
        assert_eq!(theft.actual_stolen, MAX_GEM_THEFT_AMOUNT);
        assert!(theft.difficulty_adjusted > MAX_GEM_THEFT_AMOUNT);
    }

    #[test]
    fn test_theft_uncapped_case() {
        let theft = calculate_gem_theft(200, 1, Difficulty::Normal);
        assert_eq!(theft.base_theft, 30);
        assert_eq!(theft.level_multiplier, 1.0);
        assert_eq!(theft.actual_stolen, 30);
        assert_eq!(theft.source, GemSource::Theft);
    }

    #[test]
    fn test_theft_minimum_applies() {
        let theft = calculate_gem_theft(20, 1, Difficulty::Easy);
        assert_eq!(theft.difficulty_adjusted, 2);
        assert_eq!(theft.actual_stolen, MIN_GEM_THEFT_AMOUNT);
    }

    #[test]
    fn test_theft_never_exceeds_opponent_balance() {
        for gems in 1..5 {
            let theft = calculate_gem_theft(gems, 10, Difficulty::Expert);
            assert_eq!(theft.actual_stolen, gems);
        }
    }

    #[test]
    fn test_theft_from_empty_opponent() {
        let theft = calculate_gem_theft(0, 10, Difficulty::Expert);
        assert_eq!(theft.base_theft, 0);
        assert_eq!(theft.difficulty_adjusted, 0);
        assert_eq!(theft.actual_stolen, 0);
        assert_eq!(theft.source, GemSource::Theft);
    }

    #[test]
    fn test_theft_level_multiplier_has_no_ceiling() {
        assert!((theft_level_multiplier(51) - 2.0).abs() < 1e-9);
        assert!((theft_level_multiplier(1) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ai_gem_reward_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for d in Difficulty::ALL {
            let (low, high) = ai_gem_range(d);
            for _ in 0..200 {
                let gems = generate_ai_gem_reward(d, &mut rng);
                assert!((low..=high).contains(&gems));
            }
        }
    }

    #[test]
    fn test_ai_gem_reward_unknown_label_uses_normal_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..200 {
            let gems = generate_ai_gem_reward_for_label("???", &mut rng);
            assert!((10..=25).contains(&gems));
        }
    }

    #[test]
    fn test_ai_gem_reward_with_constant_rng_is_lowest() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(generate_ai_gem_reward(Difficulty::Expert, &mut rng), 35);
    }

    #[test]
    fn test_validate_gem_reward() {
        assert_eq!(validate_gem_reward(-5.0), 0);
        assert_eq!(validate_gem_reward(10_000.0), 200);
        assert_eq!(validate_gem_reward(f64::NAN), 0);
        assert_eq!(validate_gem_reward(f64::INFINITY), 200);
        assert_eq!(validate_gem_reward(f64::NEG_INFINITY), 0);
        assert_eq!(validate_gem_reward(42.9), 42);
        assert_eq!(validate_gem_reward(200.0), 200);
        assert_eq!(validate_gem_reward_with_max(150.0, 100), 100);
    }

    #[test]
    fn test_total_rewards_defeat_is_zero() {
        let b = calculate_total_gem_rewards(false, true, 5, Difficulty::Hard, 500, 3);
        assert_eq!(b, GemRewardBreakdown::default());
    }

    #[test]
    fn test_total_rewards_ai_victory() {
        let b = calculate_total_gem_rewards(true, false, 5, Difficulty::Hard, 999, 3);
        assert_eq!(b.victory_gems, 28);
        assert_eq!(b.stolen_gems, 0);
        assert_eq!(b.total_gems, 28);
        assert!(b.theft.is_none());
        assert_eq!(b.reward.unwrap().base_reward, 20);
    }

    #[test]
    fn test_total_rewards_pvp_victory() {
        let b = calculate_total_gem_rewards(true, true, 10, Difficulty::Expert, 1000, 3);
        assert_eq!(b.victory_gems, 0);
        assert_eq!(b.stolen_gems, 100);
        assert_eq!(b.total_gems, 100);
        assert!(b.reward.is_none());
    }

    #[test]
    fn test_total_rewards_pvp_against_broke_opponent() {
        let b = calculate_total_gem_rewards(true, true, 10, Difficulty::Expert, 0, 3);
        assert_eq!(b.total_gems, 0);
    }
}
