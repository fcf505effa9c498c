//! Main simulation runner.
//!
//! Battles go through the same session and reward settlement paths as live
//! play. Progression is written back to an in-memory store after each battle,
//! so creatures keep levelling across the run.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use tracing::{debug, warn};

use super::config::SimConfig;
use super::report::{BattleRecord, SimReport};
use crate::battle::{BattleSession, Side};
use crate::creature::{Creature, CreatureStatus, Stats};
use crate::gems::generate_ai_gem_reward;
use crate::persistence::{persist_progression, InMemoryProgressionStore, ProgressionStore};
use crate::rewards::{settle_battle, RewardContext};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let roster = generate_roster(config.roster_size, &mut rng);
    let store = InMemoryProgressionStore::with_creatures(roster);
    let mut records = Vec::with_capacity(config.num_battles as usize);

    for battle_idx in 0..config.num_battles {
        let record = simulate_battle(config, &store, &mut rng);
        if config.verbosity >= 2 {
            if let Some(r) = &record {
                println!(
                    "Battle {}/{} - {} ({}), {} rounds, {} XP, {} gems{}",
                    battle_idx + 1,
                    config.num_battles,
                    if r.victory { "won" } else { "lost" },
                    r.difficulty,
                    r.rounds,
                    r.experience,
                    r.gems,
                    if r.leveled_up { ", level up!" } else { "" }
                );
            }
        }
        records.push(record);
    }

    let final_levels = store
        .list_creatures()
        .map(|cs| cs.iter().map(|c| c.level).collect())
        .unwrap_or_default();

    SimReport::from_records(records, final_levels)
}

/// Generates a roster of battle-ready creatures with random stats.
pub fn generate_roster(size: usize, rng: &mut impl Rng) -> Vec<Creature> {
    (0..size)
        .map(|i| {
            let stats = Stats::new(
                rng.gen_range(30..=100),
                rng.gen_range(30..=100),
                rng.gen_range(30..=100),
                rng.gen_range(60..=150),
            );
            Creature::new(format!("Creature {:02}", i + 1), stats)
                .with_status(CreatureStatus::Ready)
                .with_level(rng.gen_range(1..=10))
        })
        .collect()
}

/// Fights one battle between two random roster creatures.
/// Returns None if the battle could not be set up or ran past the round limit.
fn simulate_battle(
    config: &SimConfig,
    store: &InMemoryProgressionStore,
    rng: &mut impl Rng,
) -> Option<BattleRecord> {
    let roster = store.list_creatures().ok()?;
    if roster.is_empty() {
        return None;
    }
    let player = roster[rng.gen_range(0..roster.len())].clone();

    let mut session = BattleSession::new();
    session.select_player(player.clone()).ok()?;
    let opponent = match session.select_random_opponent(&roster, rng) {
        Ok(opponent) => opponent,
        Err(e) => {
            debug!(error = %e, "skipping battle");
            return None;
        }
    };
    let token = session.start_battle().ok()?;

    let mut rounds = 0;
    while !session.is_over() {
        if rounds >= config.max_rounds_per_battle {
            warn!(rounds, "battle abandoned at round limit");
            return None;
        }
        session.resolve_round(token, rng).ok()?;
        rounds += 1;
    }
    let victory = session.winner() == Some(Side::Player);

    let is_pvp = rng.gen_range(0..100) < config.pvp_percent;
    let context = RewardContext {
        trainer_level: config.trainer_level,
        is_pvp,
        opponent_gems: if is_pvp { rng.gen_range(0..=500) } else { 0 },
    };
    let now = chrono::Utc::now().timestamp();
    let rewards = settle_battle(&player, &opponent, victory, &context, now, rng);
    let ai_gem_pool = (!is_pvp).then(|| generate_ai_gem_reward(rewards.gem_difficulty, rng));

    // The record still counts when the save fails; the report tallies the failure.
    let saved = match persist_progression(store, &rewards.updated_creature) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "progression not saved");
            false
        }
    };

    Some(BattleRecord {
        difficulty: rewards.difficulty,
        gem_difficulty: rewards.gem_difficulty,
        is_pvp,
        victory,
        rounds,
        experience: rewards.experience.total_experience,
        gems: rewards.gems.total_gems,
        leveled_up: rewards.progression.leveled_up,
        levels_gained: rewards.progression.current_level - player.level.max(1),
        ai_gem_pool,
        saved,
    })
}
