use std::collections::BTreeMap;

use serde_json::json;

use crate::assets::{Asset, AssetKind, AssetPipeline, AssetSurface};
use crate::module_system::error::ModuleSystemError;
use crate::module_system::settings::SettingDescriptor;
use crate::module_system::traits::{ExtensionModule, ModuleContext};
use crate::platform::routes::{HttpMethod, RouteDef, RouteRegistry};
use crate::platform::ui::{UiPanelKind, UiPanelRegistry};
use crate::storage::provider::KeyValueStore;

/// Ticket sales on top of the events module.
pub struct TicketsModule;

impl TicketsModule {
    pub const ID: &'static str = "tickets";

    /// Persisted order ledger. User data: survives deactivation.
    pub const LEDGER_KEY: &'static str = "tickets.ledger";
    /// Transient seat holds, cleared when the module is turned off.
    pub const HOLDS_KEY: &'static str = "tickets.holds";

    pub fn new() -> Self {
        Self
    }
}

impl Default for TicketsModule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionModule for TicketsModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Tickets"
    }

    fn description(&self) -> &str {
        "Ticket sales and seat holds for events"
    }

    fn version(&self) -> &str {
        "1.1.2"
    }

    fn dependencies(&self) -> Vec<String> {
        // String id rather than EventsModule::ID: the events feature may be
        // compiled out while tickets is not.
        vec!["events".to_string()]
    }

    fn init(&self, ctx: &mut ModuleContext<'_>) -> Result<(), ModuleSystemError> {
        let settings = ctx.settings();
        let stock_cap: i64 = settings.get_or("stock_cap", 100);
        if stock_cap <= 0 {
            return Err(ModuleSystemError::init(
                Self::ID,
                format!("stock_cap must be positive, got {}", stock_cap),
            ));
        }
        Ok(())
    }

    fn register_assets(&self, assets: &mut AssetPipeline) -> Result<(), ModuleSystemError> {
        // Checkout rides on the events script being present first.
        assets.register(
            Asset::script("foyer-tickets", "/assets/js/tickets.js", AssetSurface::Frontend)
                .with_deps(&["foyer-events"])
                .with_version(self.version()),
        );
        assets.register(Asset::style(
            "foyer-tickets-admin",
            "/assets/css/tickets-admin.css",
            AssetSurface::Admin,
        ));
        Ok(())
    }

    fn enqueue_assets(
        &self,
        assets: &mut AssetPipeline,
        surface: AssetSurface,
    ) -> Result<(), ModuleSystemError> {
        match surface {
            AssetSurface::Frontend => {
                assets.enqueue(AssetKind::Script, "foyer-tickets");
            }
            AssetSurface::Admin => {
                assets.enqueue(AssetKind::Style, "foyer-tickets-admin");
            }
        }
        Ok(())
    }

    fn register_api_routes(&self, routes: &mut RouteRegistry) -> Result<(), ModuleSystemError> {
        routes.add(RouteDef::new(
            HttpMethod::Post,
            "/events/{id}/tickets",
            "tickets.order",
            Self::ID,
        ));
        routes.add(RouteDef::new(
            HttpMethod::Get,
            "/tickets/{code}",
            "tickets.lookup",
            Self::ID,
        ));
        Ok(())
    }

    fn register_ui_extensions(&self, panels: &mut UiPanelRegistry) -> Result<(), ModuleSystemError> {
        panels.add("ticket-stock", "Ticket stock", UiPanelKind::MetaBox, Self::ID);
        Ok(())
    }

    fn settings_schema(&self) -> BTreeMap<String, SettingDescriptor> {
        BTreeMap::from([
            (
                "currency".to_string(),
                SettingDescriptor::text("Currency code", "USD"),
            ),
            (
                "stock_cap".to_string(),
                SettingDescriptor::number("Maximum tickets per event", 100),
            ),
        ])
    }

    fn on_activate(&self, store: &dyn KeyValueStore) -> Result<(), ModuleSystemError> {
        // Seed the ledger on first activation only; re-activation must not
        // touch existing orders.
        let exists = store.contains(Self::LEDGER_KEY).map_err(|e| {
            ModuleSystemError::ActivationHook {
                module: Self::ID.to_string(),
                message: e.to_string(),
            }
        })?;
        if !exists {
            store
                .set(Self::LEDGER_KEY, json!({"orders": []}))
                .map_err(|e| ModuleSystemError::ActivationHook {
                    module: Self::ID.to_string(),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }

    fn on_deactivate(&self, store: &dyn KeyValueStore) -> Result<(), ModuleSystemError> {
        // Holds are transient; the ledger is user data and stays.
        if let Err(e) = store.remove(Self::HOLDS_KEY) {
            return Err(ModuleSystemError::DeactivationHook {
                module: Self::ID.to_string(),
                message: e.to_string(),
            });
        }
        Ok(())
    }
}
