use std::fmt::Debug;

use serde_json::Value;

use crate::storage::error::StorageSystemError;

/// Narrow persistence port for the module runtime.
///
/// The registry stores the active set under a single key and each module's
/// settings under its own key; values are whole blobs, rewritten wholesale on
/// every mutation. Implementations take `&self` and handle their own interior
/// mutability so a store can be shared behind an `Arc`.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Get the name of this store backend
    fn name(&self) -> &str;

    /// Read the blob stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<Value>, StorageSystemError>;

    /// Replace the blob stored under `key`
    fn set(&self, key: &str, value: Value) -> Result<(), StorageSystemError>;

    /// Remove the entry for `key`; returns whether an entry existed
    fn remove(&self, key: &str) -> Result<bool, StorageSystemError>;

    /// Check whether an entry exists for `key`
    fn contains(&self, key: &str) -> Result<bool, StorageSystemError>;

    /// List every key currently present
    fn keys(&self) -> Result<Vec<String>, StorageSystemError>;
}
