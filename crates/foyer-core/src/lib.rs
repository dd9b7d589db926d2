//! # Foyer Core
//!
//! Module lifecycle runtime for the Foyer content-platform extension: a
//! capability contract feature modules implement, a request-scoped registry
//! that resolves and persists activation state under dependency constraints,
//! and a bootloader that wires active modules into the host's phased
//! startup sequence.

pub mod admin;
pub mod assets;
pub mod hooks;
pub mod kernel;
pub mod module_system;
pub mod modules;
pub mod platform;
pub mod storage;

// Re-export the types most consumers start from.
pub use kernel::bootstrap::{Bootloader, ModuleProvider};
pub use kernel::error::Error as KernelError;
pub use kernel::error::Result as KernelResult;
pub use module_system::{ExtensionModule, ModuleContext, ModuleRegistry};
pub use storage::KeyValueStore;
