//! Creature experience, levelling, and stat growth.

pub mod experience;
pub mod growth;

pub use experience::{
    calculate_experience, calculate_experience_for_label, check_level_up,
    experience_multiplier, experience_required_for_level, get_experience_in_current_level,
    get_level_from_experience, level_progress_percent, total_experience_for_level,
    ExperienceCalculation, LevelProgression,
};
pub use growth::{
    apply_battle_experience, calculate_stat_increases, update_pet_progression,
    ExperienceOutcome, StatIncreases,
};
