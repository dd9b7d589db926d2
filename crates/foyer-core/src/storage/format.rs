use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::error::StorageSystemError;

/// Supported on-disk formats for the local store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl StorageFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            StorageFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            StorageFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            StorageFormat::Toml => "toml",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StorageFormat::Json => "JSON",
            #[cfg(feature = "yaml-config")]
            StorageFormat::Yaml => "YAML",
            #[cfg(feature = "toml-config")]
            StorageFormat::Toml => "TOML",
        }
    }
}

impl Default for StorageFormat {
    fn default() -> Self {
        StorageFormat::Json
    }
}

/// Envelope written to disk. TOML requires a table at the top level, so the
/// stored blob always sits under a single `value` field regardless of format.
#[derive(Debug, Serialize, Deserialize)]
struct StoredValue {
    value: Value,
}

pub(crate) fn serialize_value(
    key: &str,
    value: Value,
    format: StorageFormat,
) -> Result<String, StorageSystemError> {
    let envelope = StoredValue { value };
    let serialization_error = |message: String| StorageSystemError::Serialization {
        key: key.to_string(),
        format: format.label(),
        message,
    };
    match format {
        StorageFormat::Json => {
            serde_json::to_string_pretty(&envelope).map_err(|e| serialization_error(e.to_string()))
        }
        #[cfg(feature = "yaml-config")]
        StorageFormat::Yaml => {
            serde_yaml::to_string(&envelope).map_err(|e| serialization_error(e.to_string()))
        }
        #[cfg(feature = "toml-config")]
        StorageFormat::Toml => {
            toml::to_string_pretty(&envelope).map_err(|e| serialization_error(e.to_string()))
        }
    }
}

pub(crate) fn deserialize_value(
    key: &str,
    data: &str,
    format: StorageFormat,
) -> Result<Value, StorageSystemError> {
    let deserialization_error = |message: String| StorageSystemError::Deserialization {
        key: key.to_string(),
        format: format.label(),
        message,
    };
    let envelope: StoredValue = match format {
        StorageFormat::Json => {
            serde_json::from_str(data).map_err(|e| deserialization_error(e.to_string()))?
        }
        #[cfg(feature = "yaml-config")]
        StorageFormat::Yaml => {
            serde_yaml::from_str(data).map_err(|e| deserialization_error(e.to_string()))?
        }
        #[cfg(feature = "toml-config")]
        StorageFormat::Toml => {
            toml::from_str(data).map_err(|e| deserialization_error(e.to_string()))?
        }
    };
    Ok(envelope.value)
}
