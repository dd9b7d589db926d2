//! # Foyer Core Admin Surface
//!
//! The contract behind the module management screen. Rendering belongs to
//! the host; this module only verifies the session capability and the
//! single-use form token, diffs the submitted selection against current
//! activation state, and forwards to the registry.

pub mod auth;
pub mod error;
pub mod selection;

pub use auth::{consume_token, issue_token, AdminSession, Capability};
pub use error::AdminSurfaceError;
pub use selection::{apply_selection, ModuleSelection, SelectionOutcome};

#[cfg(test)]
mod tests;
