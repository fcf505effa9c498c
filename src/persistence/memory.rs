use std::collections::HashMap;
use std::sync::Mutex;

use super::ProgressionStore;
use crate::creature::Creature;
use crate::error::{StoreError, StoreResult};

/// In-memory store for tests and simulations.
#[derive(Default)]
pub struct InMemoryProgressionStore {
    creatures: Mutex<HashMap<String, Creature>>,
}

impl InMemoryProgressionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `creatures`.
    pub fn with_creatures(creatures: impl IntoIterator<Item = Creature>) -> Self {
        let map = creatures.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self {
            creatures: Mutex::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.creatures.lock().map_or(0, |m| m.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProgressionStore for InMemoryProgressionStore {
    fn save_progression(&self, creature: &Creature) -> StoreResult<()> {
        let mut map = self.creatures.lock().map_err(|_| StoreError::LockPoisoned)?;
        map.insert(creature.id.clone(), creature.clone());
        Ok(())
    }

    fn load_creature(&self, id: &str) -> StoreResult<Option<Creature>> {
        let map = self.creatures.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(id).cloned())
    }

    fn list_creatures(&self) -> StoreResult<Vec<Creature>> {
        let map = self.creatures.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut creatures: Vec<Creature> = map.values().cloned().collect();
        creatures.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(creatures)
    }
}
