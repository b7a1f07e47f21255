use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::common::error::{QraftError, QraftResult};
use crate::style::StyleConfig;

// Saved gallery
//------------------------------------------------------------------------------

/// The single key the gallery owns inside the external key-value store.
pub const STORAGE_KEY: &str = "qraft.saved-codes";

/// The external key-value collaborator. The gallery owns the key and the
/// payload format, not the storage medium.
pub trait EntryStore {
    fn read(&self, key: &str) -> QraftResult<Option<String>>;
    fn write(&mut self, key: &str, payload: &str) -> QraftResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryStore {
    fn read(&self, key: &str) -> QraftResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> QraftResult<()> {
        self.slots.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

/// One JSON file per key under a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl EntryStore for FileStore {
    fn read(&self, key: &str) -> QraftResult<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some).map_err(|e| QraftError::StoreReadFailed(e.to_string()))
    }

    fn write(&mut self, key: &str, payload: &str) -> QraftResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| QraftError::StoreWriteFailed(e.to_string()))?;
        fs::write(self.path(key), payload).map_err(|e| QraftError::StoreWriteFailed(e.to_string()))
    }
}

/// A deep, immutable snapshot of a configuration at save time.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SavedEntry {
    pub id: Uuid,
    pub config: StyleConfig,
    pub created_at: DateTime<Utc>,
}

/// Saved-configuration gallery. The in-memory list and the persisted payload
/// are kept in sync by re-serializing the full list on every mutation.
pub struct Gallery<S: EntryStore> {
    store: S,
    entries: Vec<SavedEntry>,
}

impl<S: EntryStore> Gallery<S> {
    pub fn open(store: S) -> QraftResult<Self> {
        let entries = match store.read(STORAGE_KEY)? {
            Some(payload) => serde_json::from_str(&payload)
                .map_err(|e| QraftError::StoreSerializeFailed(e.to_string()))?,
            None => Vec::new(),
        };
        debug!(count = entries.len(), "gallery opened");
        Ok(Self { store, entries })
    }

    pub fn entries(&self) -> &[SavedEntry] {
        &self.entries
    }

    pub fn save(&mut self, config: &StyleConfig) -> QraftResult<Uuid> {
        let entry =
            SavedEntry { id: Uuid::new_v4(), config: config.clone(), created_at: Utc::now() };
        let id = entry.id;
        self.entries.push(entry);
        if let Err(e) = self.persist() {
            self.entries.pop();
            return Err(e);
        }
        Ok(id)
    }

    /// Clones the snapshot back into the caller by value: later edits to the
    /// live configuration never reach the saved copy.
    pub fn load(&self, id: Uuid) -> Option<StyleConfig> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.config.clone())
    }

    pub fn delete(&mut self, id: Uuid) -> QraftResult<()> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Err(QraftError::EntryNotFound(id.to_string()));
        }
        self.persist()
    }

    fn persist(&mut self) -> QraftResult<()> {
        let payload = serde_json::to_string(&self.entries)
            .map_err(|e| QraftError::StoreSerializeFailed(e.to_string()))?;
        self.store.write(STORAGE_KEY, &payload)
    }
}
