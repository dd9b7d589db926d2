use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::assets::{AssetPipeline, AssetSurface};
use crate::hooks::error::HookSystemError;
use crate::hooks::{HostHook, SharedHookDispatcher};
use crate::kernel::builtin::builtin_modules;
use crate::kernel::constants::{
    API_NAMESPACE, ASSET_ENQUEUE_PRIORITY, ASSET_REGISTER_PRIORITY, DEFAULT_HOOK_PRIORITY,
};
use crate::kernel::error::{BootPhase, Error, Result};
use crate::module_system::registry::{ModuleRegistry, ModuleStateChange};
use crate::module_system::settings::SettingsStore;
use crate::module_system::traits::{ExtensionModule, ModuleContext};
use crate::platform::content::ContentTagRegistry;
use crate::platform::routes::RouteRegistry;
use crate::platform::ui::UiPanelRegistry;
use crate::storage::provider::KeyValueStore;

/// Extension point for modules contributed from outside the core. Providers
/// are consulted once, after the built-ins are registered and before
/// activation state is evaluated.
#[async_trait]
pub trait ModuleProvider: Send + Sync {
    async fn modules(&self) -> Vec<Arc<dyn ExtensionModule>>;
}

/// Orchestrates the per-request bootstrap of the module runtime.
///
/// `boot` runs four ordered phases exactly once: register the built-in
/// table, consult external providers, initialize the active modules behind a
/// per-module failure boundary, and attach the deferred forwarding callbacks
/// to the host's lifecycle events. A repeated `boot` call is a no-op.
pub struct Bootloader {
    registry: Arc<Mutex<ModuleRegistry>>,
    hooks: SharedHookDispatcher,
    assets: Arc<Mutex<AssetPipeline>>,
    routes: Arc<Mutex<RouteRegistry>>,
    tags: Arc<Mutex<ContentTagRegistry>>,
    panels: Arc<Mutex<UiPanelRegistry>>,
    providers: Vec<Box<dyn ModuleProvider>>,
    store: Arc<dyn KeyValueStore>,
    settings: SettingsStore,
    skipped_builtins: Vec<&'static str>,
    booted: bool,
}

impl Bootloader {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let mut registry = ModuleRegistry::new(Arc::clone(&store));
        registry.subscribe(Box::new(|change| match change {
            ModuleStateChange::Activated { id } => log::info!("module activated: {}", id),
            ModuleStateChange::Deactivated { id } => log::info!("module deactivated: {}", id),
        }));
        let settings = registry.settings().clone();
        Self {
            registry: Arc::new(Mutex::new(registry)),
            hooks: SharedHookDispatcher::new(),
            assets: Arc::new(Mutex::new(AssetPipeline::new())),
            routes: Arc::new(Mutex::new(RouteRegistry::new(API_NAMESPACE))),
            tags: Arc::new(Mutex::new(ContentTagRegistry::new())),
            panels: Arc::new(Mutex::new(UiPanelRegistry::new())),
            providers: Vec::new(),
            store,
            settings,
            skipped_builtins: Vec::new(),
            booted: false,
        }
    }

    /// Register an external module provider. Providers added after `boot`
    /// has run are ignored with a warning.
    pub fn add_provider(&mut self, provider: Box<dyn ModuleProvider>) {
        if self.booted {
            log::warn!("module provider added after boot, ignoring");
            return;
        }
        self.providers.push(provider);
    }

    /// Run the four bootstrap phases. Nothing here aborts the host request:
    /// registration misuse and module init failures surface as log lines.
    pub async fn boot(&mut self) {
        if self.booted {
            log::debug!("bootloader already ran for this request, skipping");
            return;
        }
        self.register_builtins().await;
        self.register_external().await;
        self.init_active_modules().await;
        self.register_host_callbacks().await;
        self.booted = true;
        let (registered, active) = {
            let registry = self.registry.lock().await;
            (registry.module_count(), registry.get_active().len())
        };
        log::info!("module runtime ready ({} registered, {} active)", registered, active);
    }

    /// Drive the remaining host lifecycle events in request order, the way
    /// an embedding host would after `early-boot`. Forwarding passes are not
    /// failure-isolated; the first module error aborts its pass and is
    /// returned here.
    pub async fn run_request_pipeline(&self) -> Result<()> {
        if !self.booted {
            return Err(Error::BootSequence {
                phase: BootPhase::RegisterHostCallbacks,
                message: "host pipeline fired before boot()".to_string(),
            });
        }
        for hook in HostHook::REQUEST_PIPELINE {
            if hook == HostHook::EarlyBoot {
                continue;
            }
            self.hooks.fire(hook).await?;
        }
        Ok(())
    }

    /// Phase 1: instantiate the compile-time built-in table. Entries whose
    /// backing definition is compiled out are recorded, not errors.
    async fn register_builtins(&mut self) {
        let mut registry = self.registry.lock().await;
        for def in builtin_modules() {
            match def.construct() {
                Some(module) => {
                    registry.register(module);
                }
                None => {
                    log::debug!(
                        "built-in module '{}' has no backing definition, skipping",
                        def.id()
                    );
                    self.skipped_builtins.push(def.id());
                }
            }
        }
    }

    /// Phase 2: let externally contributed modules join the same registry
    /// before activation state is evaluated.
    async fn register_external(&mut self) {
        let mut registry = self.registry.lock().await;
        for provider in &self.providers {
            for module in provider.modules().await {
                registry.register(module);
            }
        }
    }

    /// Phase 3: initialize every active module inside a per-module failure
    /// boundary. One module's init failure never aborts the request.
    async fn init_active_modules(&self) {
        let active = self.registry.lock().await.get_active();
        for module in active {
            let mut ctx = ModuleContext::new(module.id(), self.store.as_ref(), &self.settings);
            if let Err(e) = module.init(&mut ctx) {
                log::error!("{}", e);
            }
        }
    }

    /// Phase 4: attach the deferred forwarding callbacks. Unlike phase 3,
    /// these passes are not failure-isolated; the first module error aborts
    /// the pass and propagates to the host's handling for that event.
    async fn register_host_callbacks(&self) {
        self.add_asset_callbacks(AssetSurface::Frontend).await;
        self.add_asset_callbacks(AssetSurface::Admin).await;
        self.add_route_callback().await;
        self.add_content_callback().await;
        self.add_ui_callback().await;
    }

    async fn add_asset_callbacks(&self, surface: AssetSurface) {
        let (register_hook, enqueue_hook) = match surface {
            AssetSurface::Frontend => (
                HostHook::FrontendAssetRegister,
                HostHook::FrontendAssetEnqueue,
            ),
            AssetSurface::Admin => (HostHook::AdminAssetRegister, HostHook::AdminAssetEnqueue),
        };

        let registry = Arc::clone(&self.registry);
        let assets = Arc::clone(&self.assets);
        self.hooks
            .add_action(
                register_hook,
                ASSET_REGISTER_PRIORITY,
                Box::new(move |hook| {
                    let registry = Arc::clone(&registry);
                    let assets = Arc::clone(&assets);
                    Box::pin(async move {
                        let registry = registry.lock().await;
                        let mut assets = assets.lock().await;
                        for module in registry.get_active() {
                            module
                                .register_assets(&mut assets)
                                .map_err(|e| HookSystemError::handler(hook, module.id(), e))?;
                        }
                        Ok(())
                    })
                }),
            )
            .await;

        let registry = Arc::clone(&self.registry);
        let assets = Arc::clone(&self.assets);
        self.hooks
            .add_action(
                enqueue_hook,
                ASSET_ENQUEUE_PRIORITY,
                Box::new(move |hook| {
                    let registry = Arc::clone(&registry);
                    let assets = Arc::clone(&assets);
                    Box::pin(async move {
                        let registry = registry.lock().await;
                        let mut assets = assets.lock().await;
                        for module in registry.get_active() {
                            module
                                .enqueue_assets(&mut assets, surface)
                                .map_err(|e| HookSystemError::handler(hook, module.id(), e))?;
                        }
                        Ok(())
                    })
                }),
            )
            .await;
    }

    async fn add_route_callback(&self) {
        let registry = Arc::clone(&self.registry);
        let routes = Arc::clone(&self.routes);
        self.hooks
            .add_action(
                HostHook::ApiRoutesInit,
                DEFAULT_HOOK_PRIORITY,
                Box::new(move |hook| {
                    let registry = Arc::clone(&registry);
                    let routes = Arc::clone(&routes);
                    Box::pin(async move {
                        let registry = registry.lock().await;
                        let mut routes = routes.lock().await;
                        for module in registry.get_active() {
                            module
                                .register_api_routes(&mut routes)
                                .map_err(|e| HookSystemError::handler(hook, module.id(), e))?;
                        }
                        Ok(())
                    })
                }),
            )
            .await;
    }

    async fn add_content_callback(&self) {
        let registry = Arc::clone(&self.registry);
        let tags = Arc::clone(&self.tags);
        self.hooks
            .add_action(
                HostHook::ContentExtensionsInit,
                DEFAULT_HOOK_PRIORITY,
                Box::new(move |hook| {
                    let registry = Arc::clone(&registry);
                    let tags = Arc::clone(&tags);
                    Box::pin(async move {
                        let registry = registry.lock().await;
                        let mut tags = tags.lock().await;
                        for module in registry.get_active() {
                            module
                                .register_content_extensions(&mut tags)
                                .map_err(|e| HookSystemError::handler(hook, module.id(), e))?;
                        }
                        Ok(())
                    })
                }),
            )
            .await;
    }

    async fn add_ui_callback(&self) {
        let registry = Arc::clone(&self.registry);
        let panels = Arc::clone(&self.panels);
        self.hooks
            .add_action(
                HostHook::UiExtensionsInit,
                DEFAULT_HOOK_PRIORITY,
                Box::new(move |hook| {
                    let registry = Arc::clone(&registry);
                    let panels = Arc::clone(&panels);
                    Box::pin(async move {
                        let registry = registry.lock().await;
                        let mut panels = panels.lock().await;
                        for module in registry.get_active() {
                            module
                                .register_ui_extensions(&mut panels)
                                .map_err(|e| HookSystemError::handler(hook, module.id(), e))?;
                        }
                        Ok(())
                    })
                }),
            )
            .await;
    }

    /// The shared registry instance
    pub fn registry(&self) -> Arc<Mutex<ModuleRegistry>> {
        Arc::clone(&self.registry)
    }

    /// Pass-through convenience for activity queries
    pub async fn is_module_active(&self, id: &str) -> bool {
        self.registry.lock().await.is_active(id)
    }

    pub fn hooks(&self) -> SharedHookDispatcher {
        self.hooks.clone()
    }

    pub fn assets(&self) -> Arc<Mutex<AssetPipeline>> {
        Arc::clone(&self.assets)
    }

    pub fn routes(&self) -> Arc<Mutex<RouteRegistry>> {
        Arc::clone(&self.routes)
    }

    pub fn content_tags(&self) -> Arc<Mutex<ContentTagRegistry>> {
        Arc::clone(&self.tags)
    }

    pub fn ui_panels(&self) -> Arc<Mutex<UiPanelRegistry>> {
        Arc::clone(&self.panels)
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Built-in table entries whose backing definition was compiled out
    pub fn skipped_builtins(&self) -> &[&'static str] {
        &self.skipped_builtins
    }

    pub fn is_booted(&self) -> bool {
        self.booted
    }
}
