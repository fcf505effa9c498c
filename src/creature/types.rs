use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::balance::{
    DEFAULT_ATTACK, DEFAULT_DEFENSE, DEFAULT_HP, FALLBACK_BATTLE_HP, MAX_CREATURE_LEVEL,
};
use crate::progression::total_experience_for_level;

/// Combat stats of a creature card.
///
/// Cards generated by the upload pipeline use `heart/speed/power/focus`;
/// those names are accepted on input and map onto `hp/speed/attack/defense`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(alias = "power")]
    pub attack: u32,
    #[serde(alias = "focus")]
    pub defense: u32,
    pub speed: u32,
    #[serde(alias = "heart")]
    pub hp: u32,
}

impl Stats {
    pub fn new(attack: u32, defense: u32, speed: u32, hp: u32) -> Self {
        Self {
            attack,
            defense,
            speed,
            hp,
        }
    }

    /// Stats assumed for a creature whose card has none yet.
    pub fn fallback() -> Self {
        Self {
            attack: DEFAULT_ATTACK,
            defense: DEFAULT_DEFENSE,
            speed: 0,
            hp: DEFAULT_HP,
        }
    }
}

/// Generation pipeline status. Only `Ready` creatures can battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureStatus {
    #[default]
    Queued,
    Processing,
    Ready,
    Failed,
}

/// A collectible creature card with its progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stats: Option<Stats>,
    pub level: u32,
    /// Total XP ever earned. Never decreases.
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub status: CreatureStatus,
    /// Unix timestamp of the last progression update.
    #[serde(default)]
    pub updated_at: i64,
}

impl Creature {
    pub fn new(name: impl Into<String>, stats: Stats) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            stats: Some(stats),
            level: 1,
            xp: 0,
            status: CreatureStatus::Queued,
            updated_at: 0,
        }
    }

    /// Builder-style helper used by rosters and tests.
    pub fn with_status(mut self, status: CreatureStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the level, clamped to `1..=MAX_CREATURE_LEVEL`. XP is raised to
    /// at least the total that level requires.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.clamp(1, MAX_CREATURE_LEVEL);
        self.xp = self.xp.max(total_experience_for_level(self.level));
        self
    }

    pub fn is_battle_ready(&self) -> bool {
        self.status == CreatureStatus::Ready
    }

    /// Stats with the card fallback applied.
    pub fn stats_or_fallback(&self) -> Stats {
        self.stats.unwrap_or_else(Stats::fallback)
    }
}

/// A creature taking part in the active battle, with its ephemeral HP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleCreature {
    pub creature: Creature,
    pub current_hp: u32,
    pub max_hp: u32,
}

impl BattleCreature {
    pub fn from_creature(creature: Creature) -> Self {
        let max_hp = creature
            .stats
            .map_or(FALLBACK_BATTLE_HP, |s| s.hp)
            .max(1);
        Self {
            creature,
            current_hp: max_hp,
            max_hp,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Applies damage, clamping HP at zero. Returns the HP left.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.current_hp = self.current_hp.saturating_sub(amount);
        self.current_hp
    }

    pub fn reset_hp(&mut self) {
        self.current_hp = self.max_hp;
    }
}
