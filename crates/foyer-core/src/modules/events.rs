use std::collections::BTreeMap;

use crate::assets::{Asset, AssetKind, AssetPipeline, AssetSurface};
use crate::module_system::error::ModuleSystemError;
use crate::module_system::settings::SettingDescriptor;
use crate::module_system::traits::{ExtensionModule, ModuleContext};
use crate::platform::content::ContentTagRegistry;
use crate::platform::routes::{HttpMethod, RouteDef, RouteRegistry};
use crate::platform::ui::{UiPanelKind, UiPanelRegistry};

/// Event listings: the anchor module most other features build on.
pub struct EventsModule;

impl EventsModule {
    pub const ID: &'static str = "events";

    pub fn new() -> Self {
        Self
    }
}

impl Default for EventsModule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionModule for EventsModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Events"
    }

    fn description(&self) -> &str {
        "Event listings with list and calendar views"
    }

    fn version(&self) -> &str {
        "1.3.0"
    }

    fn default_enabled(&self) -> bool {
        true
    }

    fn init(&self, ctx: &mut ModuleContext<'_>) -> Result<(), ModuleSystemError> {
        let settings = ctx.settings();
        let per_page: i64 = settings.get_or("per_page", 10);
        if per_page <= 0 {
            return Err(ModuleSystemError::init(
                Self::ID,
                format!("per_page must be positive, got {}", per_page),
            ));
        }
        log::debug!("events listing ready ({} per page)", per_page);
        Ok(())
    }

    fn register_assets(&self, assets: &mut AssetPipeline) -> Result<(), ModuleSystemError> {
        assets.register(
            Asset::style("foyer-events", "/assets/css/events.css", AssetSurface::Frontend)
                .with_version(self.version()),
        );
        assets.register(
            Asset::script("foyer-events", "/assets/js/events.js", AssetSurface::Frontend)
                .with_version(self.version()),
        );
        Ok(())
    }

    fn enqueue_assets(
        &self,
        assets: &mut AssetPipeline,
        surface: AssetSurface,
    ) -> Result<(), ModuleSystemError> {
        if surface == AssetSurface::Frontend {
            assets.enqueue(AssetKind::Style, "foyer-events");
            assets.enqueue(AssetKind::Script, "foyer-events");
        }
        Ok(())
    }

    fn register_api_routes(&self, routes: &mut RouteRegistry) -> Result<(), ModuleSystemError> {
        routes.add(RouteDef::new(HttpMethod::Get, "/events", "events.index", Self::ID));
        routes.add(RouteDef::new(
            HttpMethod::Get,
            "/events/{id}",
            "events.show",
            Self::ID,
        ));
        Ok(())
    }

    fn register_content_extensions(
        &self,
        tags: &mut ContentTagRegistry,
    ) -> Result<(), ModuleSystemError> {
        tags.add("event_list", Self::ID);
        tags.add("event_calendar", Self::ID);
        Ok(())
    }

    fn register_ui_extensions(&self, panels: &mut UiPanelRegistry) -> Result<(), ModuleSystemError> {
        panels.add("event-card", "Event card", UiPanelKind::Block, Self::ID);
        panels.add("event-details", "Event details", UiPanelKind::MetaBox, Self::ID);
        Ok(())
    }

    fn settings_schema(&self) -> BTreeMap<String, SettingDescriptor> {
        BTreeMap::from([
            (
                "per_page".to_string(),
                SettingDescriptor::number("Events per page", 10),
            ),
            (
                "default_view".to_string(),
                SettingDescriptor::select("Default view", &["list", "calendar"], "list"),
            ),
            (
                "show_past_events".to_string(),
                SettingDescriptor::toggle("Show past events", false),
            ),
        ])
    }
}
