use std::collections::BTreeMap;

use crate::module_system::error::ModuleSystemError;
use crate::module_system::settings::SettingDescriptor;
use crate::module_system::traits::{ExtensionModule, ModuleContext};
use crate::platform::content::ContentTagRegistry;
use crate::platform::ui::{UiPanelKind, UiPanelRegistry};

/// Meta-tag templates for event pages. The tag expansion itself happens in
/// the host's render pipeline.
pub struct SeoModule;

impl SeoModule {
    pub const ID: &'static str = "seo";

    pub fn new() -> Self {
        Self
    }
}

impl Default for SeoModule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionModule for SeoModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "SEO"
    }

    fn description(&self) -> &str {
        "Meta tags and share previews for event pages"
    }

    fn version(&self) -> &str {
        "2.0.1"
    }

    fn init(&self, _ctx: &mut ModuleContext<'_>) -> Result<(), ModuleSystemError> {
        Ok(())
    }

    fn register_content_extensions(
        &self,
        tags: &mut ContentTagRegistry,
    ) -> Result<(), ModuleSystemError> {
        tags.add("meta_tags", Self::ID);
        Ok(())
    }

    fn register_ui_extensions(&self, panels: &mut UiPanelRegistry) -> Result<(), ModuleSystemError> {
        panels.add("seo-preview", "Search preview", UiPanelKind::MetaBox, Self::ID);
        Ok(())
    }

    fn settings_schema(&self) -> BTreeMap<String, SettingDescriptor> {
        BTreeMap::from([
            (
                "title_template".to_string(),
                SettingDescriptor::text("Title template", "%title% – %site%"),
            ),
            (
                "noindex_archives".to_string(),
                SettingDescriptor::toggle("Discourage indexing of archives", false),
            ),
        ])
    }
}
