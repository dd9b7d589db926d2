use serde_json::Value;

use crate::kernel::constants::ADMIN_TOKEN_KEY_PREFIX;
use crate::storage::error::StorageSystemError;
use crate::storage::provider::KeyValueStore;

/// Capabilities the host's permission system can grant a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Change module activation state
    ManageModules,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageModules => "manage_modules",
        }
    }
}

/// The host-authenticated session submitting an admin form. The runtime only
/// consumes the capability set; authentication itself belongs to the host.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    capabilities: Vec<Capability>,
}

impl AdminSession {
    /// A session with no capabilities
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_capabilities(capabilities: &[Capability]) -> Self {
        Self {
            capabilities: capabilities.to_vec(),
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Mint a single-use form token, persisting it so any request in the same
/// deployment can consume it.
pub fn issue_token(store: &dyn KeyValueStore) -> Result<String, StorageSystemError> {
    let token = format!("{:032x}", rand::random::<u128>());
    store.set(&token_key(&token), Value::Bool(true))?;
    Ok(token)
}

/// Consume a token. Returns true exactly once per issued token; a second
/// submission with the same token is rejected.
pub fn consume_token(store: &dyn KeyValueStore, token: &str) -> bool {
    let well_formed = !token.is_empty() && token.chars().all(|c| c.is_ascii_hexdigit());
    if !well_formed {
        return false;
    }
    match store.remove(&token_key(token)) {
        Ok(existed) => existed,
        Err(e) => {
            log::error!("failed to consume admin token: {}", e);
            false
        }
    }
}

fn token_key(token: &str) -> String {
    format!("{}{}", ADMIN_TOKEN_KEY_PREFIX, token)
}
