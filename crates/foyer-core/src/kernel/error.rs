//! # Foyer Core Kernel Errors
//!
//! The top-level error type aggregating the subsystem errors, plus the
//! bootstrap-phase marker used when a failure needs to say where in the boot
//! sequence it happened.

use std::fmt;
use std::result::Result as StdResult;

use crate::admin::error::AdminSurfaceError;
use crate::hooks::error::HookSystemError;
use crate::module_system::error::ModuleSystemError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("module system error: {0}")]
    ModuleSystem(#[from] ModuleSystemError),

    #[error("storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    #[error("hook system error: {0}")]
    HookSystem(#[from] HookSystemError),

    #[error("admin surface error: {0}")]
    AdminSurface(#[from] AdminSurfaceError),

    #[error("boot sequence error during {phase}: {message}")]
    BootSequence { phase: BootPhase, message: String },

    #[error("{0}")]
    Other(String),
}

/// The four ordered bootstrap phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    RegisterBuiltins,
    ExternalRegistration,
    InitActiveModules,
    RegisterHostCallbacks,
}

impl fmt::Display for BootPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BootPhase::RegisterBuiltins => "register-builtins",
            BootPhase::ExternalRegistration => "external-registration",
            BootPhase::InitActiveModules => "init-active-modules",
            BootPhase::RegisterHostCallbacks => "register-host-callbacks",
        };
        f.write_str(name)
    }
}

/// Shorthand for Result with the kernel error type
pub type Result<T> = StdResult<T, Error>;

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
