//! Error types for the host hook dispatch layer.

use std::fmt::Display;

use crate::hooks::HostHook;

#[derive(Debug, thiserror::Error)]
pub enum HookSystemError {
    /// A deferred callback failed while forwarding to a module. Forwarding
    /// passes are not failure-isolated: the first error aborts the pass and
    /// propagates to the host's own handling for that lifecycle event.
    #[error("handler for '{hook}' failed in module '{module}': {message}")]
    HandlerFailed {
        hook: &'static str,
        module: String,
        message: String,
    },
}

impl HookSystemError {
    pub fn handler(hook: HostHook, module: &str, source: impl Display) -> Self {
        HookSystemError::HandlerFailed {
            hook: hook.name(),
            module: module.to_string(),
            message: source.to_string(),
        }
    }
}
