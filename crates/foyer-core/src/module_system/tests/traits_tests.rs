use std::sync::Arc;

use crate::assets::{AssetPipeline, AssetSurface};
use crate::module_system::error::ModuleSystemError;
use crate::module_system::settings::SettingsStore;
use crate::module_system::traits::{ExtensionModule, ModuleContext};
use crate::platform::content::ContentTagRegistry;
use crate::platform::routes::RouteRegistry;
use crate::platform::ui::UiPanelRegistry;
use crate::storage::memory::MemoryStore;

/// A module implementing only the required surface: identity plus `init`.
struct MinimalModule;

impl ExtensionModule for MinimalModule {
    fn id(&self) -> &str {
        "minimal"
    }
    fn name(&self) -> &str {
        "Minimal"
    }
    fn version(&self) -> &str {
        "0.1.0"
    }
    fn init(&self, _ctx: &mut ModuleContext<'_>) -> Result<(), ModuleSystemError> {
        Ok(())
    }
}

#[test]
fn test_contract_defaults_are_safe_noops() {
    let module = MinimalModule;
    let store = MemoryStore::new();

    assert_eq!(module.description(), "");
    assert!(module.dependencies().is_empty());
    assert!(!module.default_enabled());
    assert!(module.settings_schema().is_empty());

    let mut assets = AssetPipeline::new();
    module.register_assets(&mut assets).unwrap();
    module
        .enqueue_assets(&mut assets, AssetSurface::Frontend)
        .unwrap();
    assert_eq!(assets.registered_count(), 0);

    let mut routes = RouteRegistry::new("/foyer/v1");
    module.register_api_routes(&mut routes).unwrap();
    assert!(routes.routes().is_empty());

    let mut tags = ContentTagRegistry::new();
    module.register_content_extensions(&mut tags).unwrap();
    assert!(tags.tags().is_empty());

    let mut panels = UiPanelRegistry::new();
    module.register_ui_extensions(&mut panels).unwrap();
    assert!(panels.panels().is_empty());

    module.on_activate(&store).unwrap();
    module.on_deactivate(&store).unwrap();
}

#[test]
fn test_module_context_settings_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let settings = SettingsStore::new(store.clone());
    let ctx = ModuleContext::new("minimal", store.as_ref(), &settings);

    assert!(ctx.settings().is_empty());
    ctx.update_settings(|data| {
        data.set("greeting", "hello").unwrap();
    })
    .unwrap();
    assert_eq!(
        ctx.settings().get::<String>("greeting").as_deref(),
        Some("hello")
    );
    assert_eq!(ctx.module_id(), "minimal");
}
