//! Stat growth on level-up and the progression update applied to a creature.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::experience::{
    check_level_up, get_experience_in_current_level, total_experience_for_level, LevelProgression,
};
use crate::balance::*;
use crate::creature::{Creature, Stats};

/// Stat deltas earned by levelling up. Speed never grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatIncreases {
    pub attack: u32,
    pub defense: u32,
    pub hp: u32,
    pub previous_level: u32,
    pub new_level: u32,
}

impl StatIncreases {
    pub fn is_empty(&self) -> bool {
        self.attack == 0 && self.defense == 0 && self.hp == 0
    }
}

/// Rolls stat growth for going from `previous_level` to `new_level`.
///
/// Each stat gets a guaranteed share of its base value plus a random share,
/// scaled by the number of levels gained. Draws happen in the order
/// attack, defense, hp.
pub fn calculate_stat_increases(
    previous_level: u32,
    new_level: u32,
    base_stats: &Stats,
    rng: &mut impl Rng,
) -> StatIncreases {
    if new_level <= previous_level {
        return StatIncreases {
            previous_level,
            new_level,
            ..Default::default()
        };
    }

    let levels = (new_level - previous_level) as f64;
    let attack = roll_growth(
        base_stats.attack,
        STAT_GROWTH_BASE,
        STAT_GROWTH_JITTER,
        levels,
        MIN_STAT_INCREASE,
        rng,
    );
    let defense = roll_growth(
        base_stats.defense,
        STAT_GROWTH_BASE,
        STAT_GROWTH_JITTER,
        levels,
        MIN_STAT_INCREASE,
        rng,
    );
    let hp = roll_growth(
        base_stats.hp,
        HP_GROWTH_BASE,
        HP_GROWTH_JITTER,
        levels,
        MIN_HP_INCREASE,
        rng,
    );

    StatIncreases {
        attack,
        defense,
        hp,
        previous_level,
        new_level,
    }
}

fn roll_growth(
    base: u32,
    guaranteed: f64,
    jitter: f64,
    levels: f64,
    floor: u32,
    rng: &mut impl Rng,
) -> u32 {
    let base = base as f64;
    let roll: f64 = rng.gen();
    let gain = base * guaranteed * levels + roll * base * jitter * levels;
    (gain.floor() as u32).max(floor)
}

/// Returns `creature` with the earned XP and stat growth applied.
///
/// XP only ever goes up, the level never goes down, and speed is untouched.
pub fn update_pet_progression(
    creature: &Creature,
    experience_gained: u64,
    stat_increases: Option<&StatIncreases>,
    updated_at: i64,
) -> Creature {
    let mut updated = creature.clone();
    updated.xp = creature.xp.saturating_add(experience_gained);
    updated.updated_at = updated_at;

    if let Some(inc) = stat_increases {
        let mut stats = creature.stats_or_fallback();
        stats.attack = stats.attack.saturating_add(inc.attack);
        stats.defense = stats.defense.saturating_add(inc.defense);
        stats.hp = stats.hp.saturating_add(inc.hp);
        updated.stats = Some(stats);
        updated.level = updated.level.max(inc.new_level.min(MAX_CREATURE_LEVEL));
    }

    updated
}

/// Result of feeding one battle's XP into a creature.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceOutcome {
    pub progression: LevelProgression,
    pub stat_increases: Option<StatIncreases>,
    pub creature: Creature,
}

/// Runs the full level-up pipeline for a creature: level check, stat growth, update.
///
/// A creature whose stored XP is below what its level requires (an imported
/// card, for instance) is first rebased onto the start of that level, so the
/// gain always counts toward the next one.
pub fn apply_battle_experience(
    creature: &Creature,
    experience_gained: u64,
    updated_at: i64,
    rng: &mut impl Rng,
) -> ExperienceOutcome {
    let level_floor = total_experience_for_level(creature.level);
    let rebased;
    let creature = if creature.xp < level_floor {
        rebased = Creature {
            xp: level_floor,
            ..creature.clone()
        };
        &rebased
    } else {
        creature
    };

    let in_level = get_experience_in_current_level(creature.xp, creature.level);
    let progression = check_level_up(creature.level, in_level, experience_gained);

    let stat_increases = progression.leveled_up.then(|| {
        calculate_stat_increases(
            creature.level,
            progression.current_level,
            &creature.stats_or_fallback(),
            rng,
        )
    });

    let creature = update_pet_progression(
        creature,
        experience_gained,
        stat_increases.as_ref(),
        updated_at,
    );

    ExperienceOutcome {
        progression,
        stat_increases,
        creature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::CreatureStatus;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_no_level_gain_no_increase() {
        let base = Stats::new(50, 50, 50, 100);
        let inc = calculate_stat_increases(5, 5, &base, &mut zero_rng());
        assert!(inc.is_empty());
        assert_eq!(inc.previous_level, 5);
        assert_eq!(inc.new_level, 5);

        let down = calculate_stat_increases(5, 3, &base, &mut zero_rng());
        assert!(down.is_empty());
    }

    #[test]
    fn test_guaranteed_growth_with_zero_roll() {
        let base = Stats::new(50, 40, 70, 100);
        let inc = calculate_stat_increases(1, 2, &base, &mut zero_rng());
        assert_eq!(inc.attack, 5);
        assert_eq!(inc.defense, 4);
        assert_eq!(inc.hp, 15);
    }

    #[test]
    fn test_growth_scales_with_levels_gained() {
        let base = Stats::new(50, 40, 70, 100);
        let inc = calculate_stat_increases(1, 3, &base, &mut zero_rng());
        assert_eq!(inc.attack, 10);
        assert_eq!(inc.defense, 8);
        assert_eq!(inc.hp, 30);
    }

    #[test]
    fn test_minimum_growth_for_zero_stats() {
        let base = Stats::default();
        let inc = calculate_stat_increases(1, 2, &base, &mut zero_rng());
        assert_eq!(inc.attack, MIN_STAT_INCREASE);
        assert_eq!(inc.defense, MIN_STAT_INCREASE);
        assert_eq!(inc.hp, MIN_HP_INCREASE);
    }

    #[test]
    fn test_growth_stays_within_jitter_bounds() {
        let base = Stats::new(80, 60, 50, 120);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let inc = calculate_stat_increases(3, 5, &base, &mut rng);
            // attack: 80*0.1*2 = 16 .. 16 + 80*0.05*2 = 24
            assert!((16..24).contains(&inc.attack), "attack {}", inc.attack);
            // defense: 12 .. 18
            assert!((12..18).contains(&inc.defense), "defense {}", inc.defense);
            // hp: 36 .. 60
            assert!((36..60).contains(&inc.hp), "hp {}", inc.hp);
        }
    }

    #[test]
    fn test_update_progression_adds_xp_and_stats() {
        let creature = Creature::new("Mochi", Stats::new(50, 40, 33, 100))
            .with_status(CreatureStatus::Ready);
        let inc = StatIncreases {
            attack: 5,
            defense: 4,
            hp: 15,
            previous_level: 1,
            new_level: 2,
        };
        let updated = update_pet_progression(&creature, 120, Some(&inc), 1_700_000_000);

        assert_eq!(updated.xp, 120);
        assert_eq!(updated.level, 2);
        assert_eq!(updated.stats, Some(Stats::new(55, 44, 33, 115)));
        assert_eq!(updated.updated_at, 1_700_000_000);
        assert_eq!(updated.id, creature.id);
        // input untouched
        assert_eq!(creature.xp, 0);
    }

    #[test]
    fn test_update_progression_without_increases_keeps_stats() {
        let creature = Creature::new("Mochi", Stats::new(50, 40, 33, 100));
        let updated = update_pet_progression(&creature, 30, None, 0);
        assert_eq!(updated.xp, 30);
        assert_eq!(updated.level, 1);
        assert_eq!(updated.stats, creature.stats);
    }

    #[test]
    fn test_apply_battle_experience_levels_up() {
        let creature = Creature::new("Pip", Stats::new(50, 50, 20, 100));
        let outcome = apply_battle_experience(&creature, 260, 5, &mut zero_rng());

        assert_eq!(outcome.progression.current_level, 3);
        assert!(outcome.progression.leveled_up);
        let inc = outcome.stat_increases.unwrap();
        assert_eq!(inc.previous_level, 1);
        assert_eq!(inc.new_level, 3);
        assert_eq!(outcome.creature.level, 3);
        assert_eq!(outcome.creature.xp, 260);
        assert_eq!(outcome.creature.stats.unwrap().speed, 20);
    }

    #[test]
    fn test_apply_battle_experience_respects_existing_progress() {
        // Level 2 with 80 XP into the level (180 total); 70 more reaches level 3.
        let mut creature = Creature::new("Pip", Stats::new(50, 50, 20, 100)).with_level(2);
        creature.xp = 180;
        let outcome = apply_battle_experience(&creature, 70, 0, &mut zero_rng());
        assert_eq!(outcome.progression.current_level, 3);
        assert_eq!(outcome.progression.current_experience, 0);
        assert_eq!(outcome.creature.xp, 250);
    }

    #[test]
    fn test_xp_below_level_floor_is_not_lost() {
        // Imported at level 4 with no recorded XP; level 4 starts at 475.
        let mut creature = Creature::new("Pip", Stats::new(50, 50, 20, 100));
        creature.level = 4;
        creature.xp = 0;
        let mut rng = zero_rng();

        let first = apply_battle_experience(&creature, 200, 0, &mut rng);
        assert_eq!(first.progression.current_experience, 200);
        assert!(!first.progression.leveled_up);
        assert_eq!(first.creature.xp, 675);

        // 400 into level 4 covers its 337 requirement
        let second = apply_battle_experience(&first.creature, 200, 0, &mut rng);
        assert!(second.progression.leveled_up);
        assert_eq!(second.creature.level, 5);
        assert_eq!(second.progression.current_experience, 63);

        let mut c = second.creature;
        for _ in 0..8 {
            c = apply_battle_experience(&c, 200, 0, &mut rng).creature;
        }
        // 475 + 2000 = 2475 total, level 7 starts at 2077
        assert_eq!(c.xp, 2475);
        assert_eq!(c.level, 7);
        assert_eq!(get_experience_in_current_level(c.xp, c.level), 398);
    }

    #[test]
    fn test_apply_battle_experience_without_level_up() {
        let creature = Creature::new("Pip", Stats::new(50, 50, 20, 100));
        let outcome = apply_battle_experience(&creature, 40, 0, &mut zero_rng());
        assert!(!outcome.progression.leveled_up);
        assert!(outcome.stat_increases.is_none());
        assert_eq!(outcome.creature.stats, creature.stats);
    }
}
