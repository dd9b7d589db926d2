use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::storage::error::StorageSystemError;
use crate::storage::format::{self, StorageFormat};
use crate::storage::provider::KeyValueStore;

/// File-backed store: one file per key under a root directory.
///
/// Writes go through a named temporary file in the same directory and are
/// persisted with an atomic rename, so a crashed process never leaves a
/// half-written blob behind.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    fmt: StorageFormat,
}

impl LocalStore {
    /// Create a store rooted at `root`, creating the directory if needed
    pub fn new(root: PathBuf, fmt: StorageFormat) -> Result<Self, StorageSystemError> {
        fs::create_dir_all(&root)
            .map_err(|e| StorageSystemError::io(e, "create_dir_all", root.clone()))?;
        Ok(Self { root, fmt })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn format(&self) -> StorageFormat {
        self.fmt
    }

    /// Keys map directly to file names, so only a conservative character set
    /// is accepted: ASCII alphanumerics, '.', '_' and '-'.
    fn file_for(&self, key: &str) -> Result<PathBuf, StorageSystemError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StorageSystemError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.{}", key, self.fmt.extension())))
    }
}

impl KeyValueStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StorageSystemError> {
        let path = self.file_for(key)?;
        if !path.is_file() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)
            .map_err(|e| StorageSystemError::io(e, "read_to_string", path))?;
        format::deserialize_value(key, &data, self.fmt).map(Some)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageSystemError> {
        let path = self.file_for(key)?;
        let data = format::serialize_value(key, value, self.fmt)?;

        let temp = NamedTempFile::new_in(&self.root)
            .map_err(|e| StorageSystemError::io(e, "create_temp_file", self.root.clone()))?;
        temp.as_file()
            .write_all(data.as_bytes())
            .map_err(|e| StorageSystemError::io(e, "write_temp_file", temp.path().to_path_buf()))?;
        temp.persist(&path)
            .map_err(|e| StorageSystemError::io(e.error, "persist_temp_file", path.clone()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageSystemError> {
        let path = self.file_for(key)?;
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| StorageSystemError::io(e, "remove_file", path))?;
        Ok(true)
    }

    fn contains(&self, key: &str) -> Result<bool, StorageSystemError> {
        Ok(self.file_for(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, StorageSystemError> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| StorageSystemError::io(e, "read_dir", self.root.clone()))?;
        let suffix = format!(".{}", self.fmt.extension());
        let mut keys = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| StorageSystemError::io(e, "read_dir", self.root.clone()))?;
            if let Some(name) = entry.file_name().to_str() {
                if let Some(key) = name.strip_suffix(&suffix) {
                    keys.push(key.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
