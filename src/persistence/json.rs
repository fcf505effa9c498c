use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::ProgressionStore;
use crate::creature::Creature;
use crate::error::{StoreError, StoreResult};

/// Stores each creature as a pretty-printed JSON file named after its id.
pub struct JsonProgressionStore {
    dir: PathBuf,
}

impl JsonProgressionStore {
    /// Opens the store under `~/.creature-battle/creatures`, creating it if needed.
    pub fn new() -> StoreResult<Self> {
        let home_dir = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
        Self::with_dir(home_dir.join(".creature-battle").join("creatures"))
    }

    /// Opens the store in `dir`, creating it if needed.
    pub fn with_dir(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_id(id)))
    }
}

/// Keeps ids safe to use as file names.
fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl ProgressionStore for JsonProgressionStore {
    fn save_progression(&self, creature: &Creature) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(creature)?;
        fs::write(self.record_path(&creature.id), json)?;
        Ok(())
    }

    fn load_creature(&self, id: &str) -> StoreResult<Option<Creature>> {
        let content = match fs::read_to_string(self.record_path(id)) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let creature: Creature = serde_json::from_str(&content)?;
        if creature.id != id {
            return Err(StoreError::CorruptedRecord(format!(
                "file for {} contains creature {}",
                id, creature.id
            )));
        }
        Ok(Some(creature))
    }

    fn list_creatures(&self) -> StoreResult<Vec<Creature>> {
        let mut creatures = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(StoreError::from)
                .and_then(|s| serde_json::from_str::<Creature>(&s).map_err(StoreError::from))
            {
                Ok(creature) => creatures.push(creature),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable creature record"),
            }
        }

        creatures.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(creatures)
    }
}
