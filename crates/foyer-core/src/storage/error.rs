//! Error types for the key-value storage layer.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageSystemError {
    #[error("i/o error during '{operation}' on '{path}': {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
        operation: &'static str,
    },

    #[error("failed to serialize value for key '{key}' as {format}: {message}")]
    Serialization {
        key: String,
        format: &'static str,
        message: String,
    },

    #[error("failed to deserialize value for key '{key}' as {format}: {message}")]
    Deserialization {
        key: String,
        format: &'static str,
        message: String,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: &'static str, path: PathBuf) -> Self {
        StorageSystemError::Io {
            source,
            operation,
            path,
        }
    }
}
