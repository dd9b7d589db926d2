use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::storage::error::StorageSystemError;
use crate::storage::provider::KeyValueStore;

/// In-memory store. The default backend for ephemeral runs and tests;
/// nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an initial set of entries
    pub fn with_entries(entries: HashMap<String, Value>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        // A poisoned lock means a panic mid-write; the map itself is still
        // structurally sound, so recover the guard.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StorageSystemError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageSystemError> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageSystemError> {
        Ok(self.lock().remove(key).is_some())
    }

    fn contains(&self, key: &str) -> Result<bool, StorageSystemError> {
        Ok(self.lock().contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, StorageSystemError> {
        Ok(self.lock().keys().cloned().collect())
    }
}
