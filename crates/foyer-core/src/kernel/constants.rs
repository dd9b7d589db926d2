/// Application name
pub const APP_NAME: &str = "Foyer";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Persisted key holding the ordered active-module list
pub const ACTIVE_SET_KEY: &str = "modules.active";

/// Key prefix for per-module settings blobs
pub const MODULE_SETTINGS_KEY_PREFIX: &str = "modules.settings.";

/// Key prefix for single-use admin form tokens
pub const ADMIN_TOKEN_KEY_PREFIX: &str = "admin.token.";

/// Namespace all module API routes are registered under
pub const API_NAMESPACE: &str = "/foyer/v1";

/// Default priority for deferred host callbacks
pub const DEFAULT_HOOK_PRIORITY: u32 = 10;

/// Asset register passes run at this priority...
pub const ASSET_REGISTER_PRIORITY: u32 = 10;

/// ...and enqueue passes strictly after, so one module's enqueue can rely on
/// another module's registration.
pub const ASSET_ENQUEUE_PRIORITY: u32 = 20;

/// Environment variable naming the data directory for the file-backed store
pub const DATA_DIR_ENV: &str = "FOYER_DATA_DIR";
