//! Error types for the module lifecycle runtime.
//!
//! Registry misuse (duplicate ids, unknown modules, unmet dependencies,
//! blocked deactivations) is deliberately *not* represented here: those paths
//! return `false` and emit a log line so a configuration mistake can never
//! abort the host boot sequence. The variants below cover the fallible
//! surfaces a module itself exposes.

use crate::storage::error::StorageSystemError;

#[derive(Debug, thiserror::Error)]
pub enum ModuleSystemError {
    #[error("module '{module}' failed to initialize: {message}")]
    InitFailure { module: String, message: String },

    #[error("module '{module}' failed to register with '{target}': {message}")]
    RegistrationFailure {
        module: String,
        target: String,
        message: String,
    },

    #[error("activation hook failed for module '{module}': {message}")]
    ActivationHook { module: String, message: String },

    #[error("deactivation hook failed for module '{module}': {message}")]
    DeactivationHook { module: String, message: String },

    #[error("settings for module '{module}' could not be persisted: {source}")]
    Settings {
        module: String,
        #[source]
        source: StorageSystemError,
    },
}

impl ModuleSystemError {
    pub fn init(module: &str, message: impl Into<String>) -> Self {
        ModuleSystemError::InitFailure {
            module: module.to_string(),
            message: message.into(),
        }
    }

    pub fn registration(module: &str, target: &str, message: impl Into<String>) -> Self {
        ModuleSystemError::RegistrationFailure {
            module: module.to_string(),
            target: target.to_string(),
            message: message.into(),
        }
    }
}
