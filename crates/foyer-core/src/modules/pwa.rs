use std::collections::BTreeMap;

use crate::assets::{Asset, AssetKind, AssetPipeline, AssetSurface};
use crate::module_system::error::ModuleSystemError;
use crate::module_system::settings::SettingDescriptor;
use crate::module_system::traits::{ExtensionModule, ModuleContext};

/// Progressive-web-app shell: the service worker and install banner script.
pub struct PwaModule;

impl PwaModule {
    pub const ID: &'static str = "pwa";

    pub fn new() -> Self {
        Self
    }
}

impl Default for PwaModule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionModule for PwaModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "PWA"
    }

    fn description(&self) -> &str {
        "Offline shell and install banner"
    }

    fn version(&self) -> &str {
        "0.5.0"
    }

    fn init(&self, ctx: &mut ModuleContext<'_>) -> Result<(), ModuleSystemError> {
        let settings = ctx.settings();
        let theme_color: String = settings.get_or("theme_color", "#1f2433".to_string());
        if !theme_color.starts_with('#') {
            return Err(ModuleSystemError::init(
                Self::ID,
                format!("theme_color '{}' is not a hex color", theme_color),
            ));
        }
        Ok(())
    }

    fn register_assets(&self, assets: &mut AssetPipeline) -> Result<(), ModuleSystemError> {
        assets.register(
            Asset::script("foyer-pwa", "/assets/js/pwa.js", AssetSurface::Frontend)
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
            assets.enqueue(AssetKind::Script, "foyer-pwa");
        }
        Ok(())
    }

    fn settings_schema(&self) -> BTreeMap<String, SettingDescriptor> {
        BTreeMap::from([
            (
                "theme_color".to_string(),
                SettingDescriptor::text("Theme color", "#1f2433"),
            ),
            (
                "offline_page".to_string(),
                SettingDescriptor::text("Offline fallback path", "/offline"),
            ),
        ])
    }
}
