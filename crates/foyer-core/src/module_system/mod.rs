//! # Foyer Core Module System
//!
//! The module lifecycle runtime: the capability contract every feature
//! module implements, the request-scoped registry that resolves and persists
//! activation state under dependency constraints, and the per-module
//! settings store.
//!
//! ## Key Submodules
//!
//! - **[`traits`]**: the [`ExtensionModule`] capability contract and the
//!   [`ModuleContext`](traits::ModuleContext) handed to `init`.
//! - **[`registry`]**: the [`ModuleRegistry`] catalog plus persisted
//!   active-set membership with the direct (non-transitive) dependency gate.
//! - **[`settings`]**: declarative [`SettingDescriptor`] schemas and the
//!   lazily-loading [`SettingsStore`].
//! - **[`error`]**: [`ModuleSystemError`] for the fallible module surfaces.

pub mod error;
pub mod registry;
pub mod settings;
pub mod traits;

pub use error::ModuleSystemError;
pub use registry::{ModuleInfo, ModuleRegistry, ModuleStateChange};
pub use settings::{SettingDescriptor, SettingKind, SettingsData, SettingsSchema, SettingsStore};
pub use traits::{ExtensionModule, ModuleContext};

#[cfg(test)]
pub(crate) mod tests;
