//! Settles a finished battle into XP, stat growth, and gems for the player's creature.
//!
//! Experience and gems are computed independently from the same matchup.
//! The returned [`BattleRewards`] is final before anything is persisted.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::creature::Creature;
use crate::difficulty::{determine_battle_difficulty, determine_battle_difficulty_for_gems, Difficulty};
use crate::gems::{calculate_total_gem_rewards, GemRewardBreakdown};
use crate::progression::{
    apply_battle_experience, calculate_experience, ExperienceCalculation, LevelProgression,
    StatIncreases,
};

/// Trainer-side facts the reward formulas need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardContext {
    pub trainer_level: u32,
    pub is_pvp: bool,
    /// Opponent trainer's gem balance (PvP only).
    pub opponent_gems: u64,
}

impl Default for RewardContext {
    fn default() -> Self {
        Self {
            trainer_level: 1,
            is_pvp: false,
            opponent_gems: 0,
        }
    }
}

/// Everything a finished battle earns the player.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleRewards {
    pub is_victory: bool,
    /// Difficulty used for experience.
    pub difficulty: Difficulty,
    /// Difficulty used for gems.
    pub gem_difficulty: Difficulty,
    pub experience: ExperienceCalculation,
    pub progression: LevelProgression,
    pub stat_increases: Option<StatIncreases>,
    pub gems: GemRewardBreakdown,
    /// The player's creature with XP and stat growth applied.
    pub updated_creature: Creature,
}

/// Computes the rewards of a finished battle.
pub fn settle_battle(
    player: &Creature,
    opponent: &Creature,
    is_victory: bool,
    context: &RewardContext,
    updated_at: i64,
    rng: &mut impl Rng,
) -> BattleRewards {
    let difficulty = determine_battle_difficulty(player.stats.as_ref(), opponent.stats.as_ref());
    let gem_difficulty =
        determine_battle_difficulty_for_gems(player.stats.as_ref(), opponent.stats.as_ref());

    let experience = calculate_experience(opponent.level, difficulty, is_victory);
    let outcome = apply_battle_experience(player, experience.total_experience, updated_at, rng);

    let gems = calculate_total_gem_rewards(
        is_victory,
        context.is_pvp,
        context.trainer_level,
        gem_difficulty,
        context.opponent_gems,
        opponent.level,
    );

    info!(
        creature = %player.id,
        is_victory,
        %difficulty,
        xp = experience.total_experience,
        gems = gems.total_gems,
        leveled_up = outcome.progression.leveled_up,
        "battle settled"
    );

    BattleRewards {
        is_victory,
        difficulty,
        gem_difficulty,
        experience,
        progression: outcome.progression,
        stat_increases: outcome.stat_increases,
        gems,
        updated_creature: outcome.creature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{CreatureStatus, Stats};
    use rand::rngs::mock::StepRng;

    fn ready(name: &str, stats: Stats, level: u32) -> Creature {
        Creature::new(name, stats)
            .with_status(CreatureStatus::Ready)
            .with_level(level)
    }

    #[test]
    fn test_ai_victory_rewards() {
        let stats = Stats::new(50, 50, 50, 100);
        let mut player = ready("Mochi", stats, 1);
        player.xp = 0;
        let opponent = ready("Rex", stats, 1);
        let ctx = RewardContext {
            trainer_level: 5,
            ..Default::default()
        };

        let rewards = settle_battle(&player, &opponent, true, &ctx, 42, &mut StepRng::new(0, 0));

        assert_eq!(rewards.difficulty, Difficulty::Normal);
        assert_eq!(rewards.experience.total_experience, 97);
        assert!(!rewards.progression.leveled_up);
        assert_eq!(rewards.updated_creature.xp, 97);
        assert_eq!(rewards.updated_creature.updated_at, 42);
        // base (10+2)*1.0 = 12, * 1.4 = 16
        assert_eq!(rewards.gems.victory_gems, 16);
        assert_eq!(rewards.gems.total_gems, 16);
    }

    #[test]
    fn test_defeat_still_earns_experience_but_no_gems() {
        let stats = Stats::new(50, 50, 50, 100);
        let player = ready("Mochi", stats, 1);
        let opponent = ready("Rex", stats, 3);
        let ctx = RewardContext {
            trainer_level: 3,
            is_pvp: true,
            opponent_gems: 400,
        };

        let rewards = settle_battle(&player, &opponent, false, &ctx, 0, &mut StepRng::new(0, 0));
        // (50 + 30) * 1.2
        assert_eq!(rewards.experience.total_experience, 96);
        assert_eq!(rewards.gems.total_gems, 0);
        assert_eq!(rewards.gems.stolen_gems, 0);
    }

    #[test]
    fn test_pvp_victory_steals() {
        let stats = Stats::new(50, 50, 50, 100);
        let player = ready("Mochi", stats, 1);
        let opponent = ready("Rex", stats, 1);
        let ctx = RewardContext {
            trainer_level: 1,
            is_pvp: true,
            opponent_gems: 200,
        };
        let rewards = settle_battle(&player, &opponent, true, &ctx, 0, &mut StepRng::new(0, 0));
        assert_eq!(rewards.gems.stolen_gems, 30);
        assert_eq!(rewards.gems.victory_gems, 0);
        assert_eq!(rewards.gems.total_gems, 30);
    }

    #[test]
    fn test_level_up_applies_stat_growth() {
        let player = ready("Mochi", Stats::new(50, 50, 50, 100), 1);
        let opponent = ready("Giant", Stats::new(90, 90, 10, 200), 10);
        let rewards = settle_battle(
            &player,
            &opponent,
            true,
            &RewardContext::default(),
            0,
            &mut StepRng::new(0, 0),
        );
        assert_eq!(rewards.difficulty, Difficulty::Expert);
        // (50 + 100) * 2.0 + 25 = 325 -> level 3
        assert_eq!(rewards.experience.total_experience, 325);
        assert_eq!(rewards.progression.current_level, 3);
        let inc = rewards.stat_increases.unwrap();
        assert_eq!((inc.attack, inc.defense, inc.hp), (10, 10, 30));
        assert_eq!(
            rewards.updated_creature.stats,
            Some(Stats::new(60, 60, 50, 130))
        );
        assert_eq!(rewards.updated_creature.level, 3);
    }
}
