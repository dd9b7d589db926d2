use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kernel::constants::MODULE_SETTINGS_KEY_PREFIX;
use crate::storage::error::StorageSystemError;
use crate::storage::provider::KeyValueStore;

/// Declarative description of one module setting, consumed by the admin
/// collaborator when it renders a settings form. The runtime itself never
/// interprets these beyond carrying them in the diagnostic projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    /// Human-readable field label
    pub label: String,
    /// Field kind, drives the admin form control
    pub kind: SettingKind,
    /// Default value applied when the setting is absent
    pub default: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingKind {
    Text,
    Toggle,
    Number,
    Select { options: Vec<String> },
}

impl SettingDescriptor {
    pub fn text(label: &str, default: &str) -> Self {
        Self {
            label: label.to_string(),
            kind: SettingKind::Text,
            default: Value::String(default.to_string()),
        }
    }

    pub fn toggle(label: &str, default: bool) -> Self {
        Self {
            label: label.to_string(),
            kind: SettingKind::Toggle,
            default: Value::Bool(default),
        }
    }

    pub fn number(label: &str, default: i64) -> Self {
        Self {
            label: label.to_string(),
            kind: SettingKind::Number,
            default: Value::from(default),
        }
    }

    pub fn select(label: &str, options: &[&str], default: &str) -> Self {
        Self {
            label: label.to_string(),
            kind: SettingKind::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
            default: Value::String(default.to_string()),
        }
    }
}

/// Convenience alias for the schema map a module declares
pub type SettingsSchema = BTreeMap<String, SettingDescriptor>;

/// In-memory representation of one module's persisted settings blob
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SettingsData {
    #[serde(flatten)]
    values: HashMap<String, Value>,
}

impl SettingsData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a typed value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Get a typed value, falling back to `default` when absent or untyped
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), StorageSystemError> {
        let json_value =
            serde_json::to_value(value).map_err(|e| StorageSystemError::Serialization {
                key: key.to_string(),
                format: "JSON",
                message: e.to_string(),
            })?;
        self.values.insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Lazily-loading cache over the per-module settings keys.
///
/// Each module's blob lives under `modules.settings.<id>`, read on first
/// access and rewritten wholesale on update; there are no merge semantics.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
    cache: Arc<Mutex<HashMap<String, SettingsData>>>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn key_for(module_id: &str) -> String {
        format!("{}{}", MODULE_SETTINGS_KEY_PREFIX, module_id)
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, SettingsData>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load a module's settings, reading from the store on first access.
    /// Absent or malformed blobs yield empty settings rather than an error.
    pub fn load(&self, module_id: &str) -> SettingsData {
        if let Some(cached) = self.lock_cache().get(module_id) {
            return cached.clone();
        }
        let key = Self::key_for(module_id);
        let data = match self.store.get(&key) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                log::warn!("discarding malformed settings blob for '{}': {}", module_id, e);
                SettingsData::new()
            }),
            Ok(None) => SettingsData::new(),
            Err(e) => {
                log::error!("failed to read settings for '{}': {}", module_id, e);
                SettingsData::new()
            }
        };
        self.lock_cache().insert(module_id.to_string(), data.clone());
        data
    }

    /// Replace a module's settings blob wholesale
    pub fn update(&self, module_id: &str, data: SettingsData) -> Result<(), StorageSystemError> {
        let key = Self::key_for(module_id);
        let value =
            serde_json::to_value(&data).map_err(|e| StorageSystemError::Serialization {
                key: key.clone(),
                format: "JSON",
                message: e.to_string(),
            })?;
        self.store.set(&key, value)?;
        self.lock_cache().insert(module_id.to_string(), data);
        Ok(())
    }

    /// Read-modify-write a module's settings as one blob
    pub fn update_with(
        &self,
        module_id: &str,
        mutate: impl FnOnce(&mut SettingsData),
    ) -> Result<(), StorageSystemError> {
        let mut data = self.load(module_id);
        mutate(&mut data);
        self.update(module_id, data)
    }
}
