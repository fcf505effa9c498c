//! Balance constants for the battle progression and reward engine.
//!
//! Every formula input lives here so the engine functions stay pure.
//! Change once, test everywhere.

// =============================================================================
// LEVELING & EXPERIENCE
// =============================================================================

/// Highest level a creature can reach.
pub const MAX_CREATURE_LEVEL: u32 = 100;

/// XP required to go from level 1 to level 2.
pub const XP_CURVE_BASE: f64 = 100.0;

/// Geometric growth of the per-level requirement.
/// XP for level L = floor(XP_CURVE_BASE * XP_CURVE_GROWTH^(L-1))
pub const XP_CURVE_GROWTH: f64 = 1.5;

/// Flat XP awarded for any finished battle.
pub const BATTLE_XP_BASE: u32 = 50;

/// Additional XP per opponent level.
pub const BATTLE_XP_PER_OPPONENT_LEVEL: u32 = 10;

/// Flat XP added on victory (after the difficulty multiplier).
pub const VICTORY_XP_BONUS: u32 = 25;

/// XP multipliers indexed by difficulty (easy, normal, hard, expert).
pub const XP_DIFFICULTY_MULTIPLIERS: [f64; 4] = [1.0, 1.2, 1.5, 2.0];

/// Multiplier applied when the difficulty label is not recognised.
pub const XP_FALLBACK_MULTIPLIER: f64 = 1.0;

// =============================================================================
// STAT GROWTH
// =============================================================================

/// Guaranteed attack/defense growth per level, as a share of the base stat.
pub const STAT_GROWTH_BASE: f64 = 0.10;

/// Random attack/defense growth per level, as a share of the base stat.
pub const STAT_GROWTH_JITTER: f64 = 0.05;

/// Guaranteed HP growth per level, as a share of base HP.
pub const HP_GROWTH_BASE: f64 = 0.15;

/// Random HP growth per level, as a share of base HP.
pub const HP_GROWTH_JITTER: f64 = 0.10;

/// Minimum attack/defense gained on any level-up.
pub const MIN_STAT_INCREASE: u32 = 1;

/// Minimum HP gained on any level-up.
pub const MIN_HP_INCREASE: u32 = 2;

// =============================================================================
// DIFFICULTY CLASSIFICATION
// =============================================================================

/// Opponent/player power ratio at or above which a battle is expert.
pub const EXPERT_POWER_RATIO: f64 = 1.5;

/// Ratio at or above which a battle is hard.
pub const HARD_POWER_RATIO: f64 = 1.2;

/// Ratio at or above which a battle is normal. Anything lower is easy.
pub const NORMAL_POWER_RATIO: f64 = 0.8;

/// Power scores at or below this are treated as zero.
pub const POWER_EPSILON: f64 = 1e-9;

/// Stand-in attack when a creature has no stats yet.
pub const DEFAULT_ATTACK: u32 = 50;

/// Stand-in defense when a creature has no stats yet.
pub const DEFAULT_DEFENSE: u32 = 50;

/// Stand-in HP when a creature has no stats yet.
pub const DEFAULT_HP: u32 = 100;

// =============================================================================
// GEM ECONOMY
// =============================================================================

/// Flat gems for an AI victory before multipliers.
pub const GEM_REWARD_BASE: u32 = 10;

/// Additional gems per opponent level.
pub const GEM_REWARD_PER_OPPONENT_LEVEL: u32 = 2;

/// Gem multipliers indexed by difficulty (easy, normal, hard, expert).
pub const GEM_DIFFICULTY_MULTIPLIERS: [f64; 4] = [0.8, 1.0, 1.3, 1.6];

/// Gem multiplier used when the difficulty label is not recognised.
pub const GEM_FALLBACK_DIFFICULTY_MULTIPLIER: f64 = 1.0;

/// Trainer level multipliers for levels 1-10.
pub const TRAINER_LEVEL_MULTIPLIERS: [f64; 10] = [1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 2.0];

/// Multiplier used for trainer levels outside 1-10.
pub const TRAINER_LEVEL_FALLBACK_MULTIPLIER: f64 = 2.0;

/// Share of the opponent's balance taken by a PvP victory.
pub const GEM_THEFT_RATE: f64 = 0.15;

/// Theft bonus per trainer level above 1.
pub const GEM_THEFT_PER_TRAINER_LEVEL: f64 = 0.02;

/// Smallest theft when the opponent holds any gems.
pub const MIN_GEM_THEFT_AMOUNT: u64 = 5;

/// Largest theft from a single battle.
pub const MAX_GEM_THEFT_AMOUNT: u64 = 100;

/// Ceiling applied when validating AI rewards.
pub const MAX_GEM_REWARD_AMOUNT: u32 = 200;

/// Inclusive AI gem ranges indexed by difficulty (easy, normal, hard, expert).
pub const AI_GEM_RANGES: [(u32, u32); 4] = [(5, 15), (10, 25), (20, 40), (35, 60)];

// =============================================================================
// COMBAT
// =============================================================================

/// Smallest damage roll per attack.
pub const MIN_ATTACK_DAMAGE: u32 = 10;

/// Largest damage roll per attack (inclusive).
pub const MAX_ATTACK_DAMAGE: u32 = 34;

/// HP used when a creature enters battle without stats.
pub const FALLBACK_BATTLE_HP: u32 = 100;

/// Pacing delay between the player's move and the opponent's counter-move.
/// Only the UI waits on this; the engine resolves both moves back to back.
pub const OPPONENT_TURN_DELAY_MS: u64 = 1500;
