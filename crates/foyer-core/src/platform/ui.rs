use std::collections::HashSet;

/// Kind of UI extension a module contributes to the host editor/admin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiPanelKind {
    /// Content-editor block
    Block,
    /// Admin edit-screen meta box
    MetaBox,
}

impl UiPanelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiPanelKind::Block => "block",
            UiPanelKind::MetaBox => "meta_box",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiPanel {
    pub id: String,
    pub title: String,
    pub kind: UiPanelKind,
    pub module: String,
}

/// Registration sink for UI panels
#[derive(Debug, Default)]
pub struct UiPanelRegistry {
    panels: Vec<UiPanel>,
    index: HashSet<String>,
}

impl UiPanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: &str, title: &str, kind: UiPanelKind, module: &str) -> bool {
        if self.index.contains(id) {
            log::warn!("ui panel '{}' already registered, ignoring module '{}'", id, module);
            return false;
        }
        self.index.insert(id.to_string());
        self.panels.push(UiPanel {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            module: module.to_string(),
        });
        true
    }

    pub fn panels(&self) -> &[UiPanel] {
        &self.panels
    }
}
