use std::collections::BTreeMap;

/// An inline content extension: a named tag authors can place in content,
/// expanded by the host's templating at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentTag {
    pub name: String,
    pub module: String,
}

/// Registration sink for content tags, keyed by tag name
#[derive(Debug, Default)]
pub struct ContentTagRegistry {
    tags: BTreeMap<String, ContentTag>,
}

impl ContentTagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag. Tag names are global; a second registration for a
    /// taken name is rejected with a warning.
    pub fn add(&mut self, name: &str, module: &str) -> bool {
        if let Some(existing) = self.tags.get(name) {
            log::warn!(
                "content tag '{}' already registered by module '{}', ignoring module '{}'",
                name,
                existing.module,
                module
            );
            return false;
        }
        self.tags.insert(
            name.to_string(),
            ContentTag {
                name: name.to_string(),
                module: module.to_string(),
            },
        );
        true
    }

    pub fn get(&self, name: &str) -> Option<&ContentTag> {
        self.tags.get(name)
    }

    pub fn tags(&self) -> &BTreeMap<String, ContentTag> {
        &self.tags
    }
}
