use std::collections::BTreeMap;

use crate::assets::{AssetPipeline, AssetSurface};
use crate::module_system::error::ModuleSystemError;
use crate::module_system::settings::{SettingDescriptor, SettingsData, SettingsStore};
use crate::platform::content::ContentTagRegistry;
use crate::platform::routes::RouteRegistry;
use crate::platform::ui::UiPanelRegistry;
use crate::storage::provider::KeyValueStore;

/// Request-scoped context handed to a module's `init`.
///
/// A module instance is constructed fresh every request and must not assume
/// any cross-request memory; whatever it needs to remember goes through the
/// settings store or the key-value store reachable from here.
pub struct ModuleContext<'a> {
    module_id: String,
    store: &'a dyn KeyValueStore,
    settings: &'a SettingsStore,
}

impl<'a> ModuleContext<'a> {
    pub fn new(module_id: &str, store: &'a dyn KeyValueStore, settings: &'a SettingsStore) -> Self {
        Self {
            module_id: module_id.to_string(),
            store,
            settings,
        }
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store
    }

    /// The calling module's own settings, lazily loaded on first access
    pub fn settings(&self) -> SettingsData {
        self.settings.load(&self.module_id)
    }

    /// Rewrite the calling module's settings blob wholesale
    pub fn update_settings(
        &self,
        mutate: impl FnOnce(&mut SettingsData),
    ) -> Result<(), ModuleSystemError> {
        self.settings
            .update_with(&self.module_id, mutate)
            .map_err(|source| ModuleSystemError::Settings {
                module: self.module_id.clone(),
                source,
            })
    }
}

/// Capability contract every feature module implements.
///
/// Everything except the identity getters and `init` has a safe no-op
/// default, so a minimal module stays minimal. All methods must be safe to
/// call on every request; lifecycle hooks (`on_activate`/`on_deactivate`)
/// fire exactly once at the moment the registry transitions the module's
/// membership in the active set.
pub trait ExtensionModule: Send + Sync {
    /// Unique, stable module id (lowercase/underscore convention)
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Display description
    fn description(&self) -> &str {
        ""
    }

    /// Semantic version, informational only; never enforced
    fn version(&self) -> &str;

    /// Module ids that must be active before this module can activate
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether the module is auto-activated on first registration
    fn default_enabled(&self) -> bool {
        false
    }

    /// Register the module's runtime behavior. Called once per request, for
    /// active modules only. Expected conditions must not error; the caller
    /// contains unexpected failures per-module.
    fn init(&self, ctx: &mut ModuleContext<'_>) -> Result<(), ModuleSystemError>;

    /// Declare assets with the pipeline (first pass)
    fn register_assets(&self, _assets: &mut AssetPipeline) -> Result<(), ModuleSystemError> {
        Ok(())
    }

    /// Request inclusion of previously registered assets for a surface
    /// (second pass, fired after every module's register pass)
    fn enqueue_assets(
        &self,
        _assets: &mut AssetPipeline,
        _surface: AssetSurface,
    ) -> Result<(), ModuleSystemError> {
        Ok(())
    }

    /// Contribute routes to the host's API surface
    fn register_api_routes(&self, _routes: &mut RouteRegistry) -> Result<(), ModuleSystemError> {
        Ok(())
    }

    /// Contribute content tags (inline content extensions)
    fn register_content_extensions(
        &self,
        _tags: &mut ContentTagRegistry,
    ) -> Result<(), ModuleSystemError> {
        Ok(())
    }

    /// Contribute UI panels (editor blocks, admin meta boxes)
    fn register_ui_extensions(
        &self,
        _panels: &mut UiPanelRegistry,
    ) -> Result<(), ModuleSystemError> {
        Ok(())
    }

    /// Declarative settings schema, consumed by the admin collaborator
    fn settings_schema(&self) -> BTreeMap<String, SettingDescriptor> {
        BTreeMap::new()
    }

    /// One-time setup at activation, e.g. seeding a persisted structure.
    /// A failure here is logged; the activation itself stands.
    fn on_activate(&self, _store: &dyn KeyValueStore) -> Result<(), ModuleSystemError> {
        Ok(())
    }

    /// Transient cleanup at deactivation. Must never delete user data.
    fn on_deactivate(&self, _store: &dyn KeyValueStore) -> Result<(), ModuleSystemError> {
        Ok(())
    }
}
