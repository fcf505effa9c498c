//! Storage contract for creature progression.
//!
//! The engine only hands finished records to a [`ProgressionStore`]; it never
//! reads them back mid-battle.

mod json;
mod memory;

pub use json::JsonProgressionStore;
pub use memory::InMemoryProgressionStore;

use tracing::{error, info};

use crate::creature::Creature;
use crate::error::StoreResult;

/// Durable storage for creature records.
pub trait ProgressionStore {
    /// Writes the creature's current xp, level, stats, and timestamp.
    fn save_progression(&self, creature: &Creature) -> StoreResult<()>;

    /// Loads a creature by id.
    fn load_creature(&self, id: &str) -> StoreResult<Option<Creature>>;

    /// Lists all stored creatures.
    fn list_creatures(&self) -> StoreResult<Vec<Creature>>;
}

/// Saves a settled creature, logging the outcome.
///
/// A failure only affects durability; the caller keeps the computed rewards.
pub fn persist_progression(store: &impl ProgressionStore, creature: &Creature) -> StoreResult<()> {
    match store.save_progression(creature) {
        Ok(()) => {
            info!(creature = %creature.id, level = creature.level, xp = creature.xp, "progression saved");
            Ok(())
        }
        Err(e) => {
            error!(creature = %creature.id, error = %e, "failed to save progression");
            Err(e)
        }
    }
}
