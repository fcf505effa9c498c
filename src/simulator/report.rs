//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::difficulty::Difficulty;

/// Outcome of one simulated battle.
#[derive(Debug, Clone, Serialize)]
pub struct BattleRecord {
    pub difficulty: Difficulty,
    pub gem_difficulty: Difficulty,
    pub is_pvp: bool,
    pub victory: bool,
    pub rounds: u32,
    pub experience: u64,
    pub gems: u32,
    pub leveled_up: bool,
    pub levels_gained: u32,
    /// Gem pool rolled for the AI opponent (AI battles only).
    pub ai_gem_pool: Option<u32>,
    /// Whether the progression store accepted the updated creature.
    pub saved: bool,
}

/// Aggregated results from a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_battles: u32,
    pub battles_completed: u32,
    pub battles_skipped: u32,
    pub pvp_battles: u32,
    pub player_wins: u32,
    /// Completed battles whose progression could not be saved
    pub failed_saves: u32,

    pub total_experience: u64,
    pub total_gems: u64,
    pub total_level_ups: u32,

    pub avg_rounds: f64,
    pub avg_experience: f64,
    pub avg_gems_per_victory: f64,
    pub avg_ai_gem_pool: f64,

    /// Battles per experience difficulty tier
    pub difficulty_distribution: BTreeMap<Difficulty, u32>,
    /// Battles where the experience and gem classifiers picked different tiers
    pub classifier_disagreements: u32,

    /// Creature levels at the end of the run
    pub final_levels: Vec<u32>,
}

impl SimReport {
    /// Create a report from per-battle records. `None` entries are skipped battles.
    pub fn from_records(records: Vec<Option<BattleRecord>>, final_levels: Vec<u32>) -> Self {
        let num_battles = records.len() as u32;
        let done: Vec<BattleRecord> = records.into_iter().flatten().collect();
        let battles_completed = done.len() as u32;
        let wins: Vec<&BattleRecord> = done.iter().filter(|r| r.victory).collect();

        let total_experience = done.iter().map(|r| r.experience).sum();
        let total_gems: u64 = done.iter().map(|r| r.gems as u64).sum();
        let ai_pools: Vec<u32> = done.iter().filter_map(|r| r.ai_gem_pool).collect();

        let mut difficulty_distribution = BTreeMap::new();
        for r in &done {
            *difficulty_distribution.entry(r.difficulty).or_insert(0) += 1;
        }

        Self {
            num_battles,
            battles_completed,
            battles_skipped: num_battles - battles_completed,
            pvp_battles: done.iter().filter(|r| r.is_pvp).count() as u32,
            player_wins: wins.len() as u32,
            failed_saves: done.iter().filter(|r| !r.saved).count() as u32,
            total_experience,
            total_gems,
            total_level_ups: done.iter().map(|r| r.levels_gained).sum(),
            avg_rounds: average(done.iter().map(|r| r.rounds as f64)),
            avg_experience: average(done.iter().map(|r| r.experience as f64)),
            avg_gems_per_victory: average(wins.iter().map(|r| r.gems as f64)),
            avg_ai_gem_pool: average(ai_pools.iter().map(|&g| g as f64)),
            difficulty_distribution,
            classifier_disagreements: done
                .iter()
                .filter(|r| r.difficulty != r.gem_difficulty)
                .count() as u32,
            final_levels,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.battles_completed == 0 {
            0.0
        } else {
            self.player_wins as f64 / self.battles_completed as f64
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                  BATTLE SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Battles: {} total, {} completed, {} skipped ({} PvP)\n\n",
            self.num_battles, self.battles_completed, self.battles_skipped, self.pvp_battles
        ));

        if self.failed_saves > 0 {
            report.push_str(&format!(
                "WARNING: {} battle results could not be saved\n\n",
                self.failed_saves
            ));
        }

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Player Win Rate:     {:.1}%\n", self.win_rate() * 100.0));
        report.push_str(&format!("  Avg Rounds:          {:.1}\n\n", self.avg_rounds));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg XP / Battle:     {:.1}\n", self.avg_experience));
        report.push_str(&format!("  Total Level Ups:     {}\n", self.total_level_ups));
        if let Some(max) = self.final_levels.iter().max() {
            report.push_str(&format!("  Highest Level:       {}\n", max));
        }
        report.push('\n');

        report.push_str("── GEMS ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Total Gems:          {}\n", self.total_gems));
        report.push_str(&format!("  Avg Gems / Victory:  {:.1}\n", self.avg_gems_per_victory));
        report.push_str(&format!("  Avg AI Gem Pool:     {:.1}\n\n", self.avg_ai_gem_pool));

        report.push_str("── DIFFICULTY ───────────────────────────────────────────────────\n");
        for d in Difficulty::ALL {
            let count = self.difficulty_distribution.get(&d).copied().unwrap_or(0);
            let pct = if self.battles_completed == 0 {
                0.0
            } else {
                count as f64 / self.battles_completed as f64 * 100.0
            };
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<7} {:>5.1}% {}\n", d.as_str(), pct, bar));
        }
        report.push_str(&format!(
            "  XP/gem tier mismatch: {}\n",
            self.classifier_disagreements
        ));

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
