//! # Foyer Core Host Hooks
//!
//! The host application exposes a fixed set of named lifecycle events, each
//! fired at a known point in its request pipeline. The bootloader attaches
//! deferred callbacks to them through a priority-ordered dispatcher; at fire
//! time each callback forwards to the active modules.

pub mod dispatcher;
pub mod error;

use std::fmt;

pub use dispatcher::{HookDispatcher, SharedHookDispatcher};
pub use error::HookSystemError;

/// Identifier for a registered callback
pub type HookId = u64;

/// Host lifecycle events the runtime consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostHook {
    /// Earliest extension point; the bootloader runs here
    EarlyBoot,
    FrontendAssetRegister,
    FrontendAssetEnqueue,
    AdminAssetRegister,
    AdminAssetEnqueue,
    ApiRoutesInit,
    ContentExtensionsInit,
    UiExtensionsInit,
}

impl HostHook {
    /// The host's name for this extension point
    pub fn name(&self) -> &'static str {
        match self {
            HostHook::EarlyBoot => "early-boot",
            HostHook::FrontendAssetRegister => "frontend-asset-register",
            HostHook::FrontendAssetEnqueue => "frontend-asset-enqueue",
            HostHook::AdminAssetRegister => "admin-asset-register",
            HostHook::AdminAssetEnqueue => "admin-asset-enqueue",
            HostHook::ApiRoutesInit => "api-routes-init",
            HostHook::ContentExtensionsInit => "content-extensions-init",
            HostHook::UiExtensionsInit => "ui-extensions-init",
        }
    }

    /// The order the host fires these events within one request
    pub const REQUEST_PIPELINE: [HostHook; 8] = [
        HostHook::EarlyBoot,
        HostHook::FrontendAssetRegister,
        HostHook::FrontendAssetEnqueue,
        HostHook::AdminAssetRegister,
        HostHook::AdminAssetEnqueue,
        HostHook::ApiRoutesInit,
        HostHook::ContentExtensionsInit,
        HostHook::UiExtensionsInit,
    ];
}

impl fmt::Display for HostHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
