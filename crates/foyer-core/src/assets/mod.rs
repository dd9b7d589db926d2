//! # Foyer Core Asset Pipeline
//!
//! Registration/dedupe/flush queue for scripts and styles. Modules declare
//! assets during the register pass, request inclusion during the later
//! enqueue pass, and the host drains the queue per surface with `flush`.
//! The pipeline never reads or bundles the files it describes.

use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Script,
    Style,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Script => "script",
            AssetKind::Style => "style",
        }
    }
}

/// Which rendering surface an asset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSurface {
    Frontend,
    Admin,
}

impl AssetSurface {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetSurface::Frontend => "frontend",
            AssetSurface::Admin => "admin",
        }
    }
}

impl fmt::Display for AssetSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared script or style. Handles are unique per kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub handle: String,
    pub kind: AssetKind,
    pub src: String,
    pub deps: Vec<String>,
    pub version: Option<String>,
    pub surface: AssetSurface,
}

impl Asset {
    pub fn script(handle: &str, src: &str, surface: AssetSurface) -> Self {
        Self {
            handle: handle.to_string(),
            kind: AssetKind::Script,
            src: src.to_string(),
            deps: Vec::new(),
            version: None,
            surface,
        }
    }

    pub fn style(handle: &str, src: &str, surface: AssetSurface) -> Self {
        Self {
            handle: handle.to_string(),
            kind: AssetKind::Style,
            src: src.to_string(),
            deps: Vec::new(),
            version: None,
            surface,
        }
    }

    /// Handles (same kind) that must be emitted before this asset
    pub fn with_deps(mut self, deps: &[&str]) -> Self {
        self.deps = deps.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }
}

/// Two-phase asset queue: `register` declares availability, `enqueue`
/// requests inclusion by handle, `flush` drains per surface with registered
/// dependencies expanded ahead of their dependents.
#[derive(Debug, Default)]
pub struct AssetPipeline {
    registered: HashMap<(AssetKind, String), Asset>,
    enqueued: Vec<(AssetKind, String)>,
    enqueued_index: HashSet<(AssetKind, String)>,
}

impl AssetPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an asset. Re-registering an identical declaration is an
    /// idempotent no-op; a conflicting declaration for a taken handle is
    /// rejected with a warning.
    pub fn register(&mut self, asset: Asset) -> bool {
        let key = (asset.kind, asset.handle.clone());
        if let Some(existing) = self.registered.get(&key) {
            if *existing == asset {
                log::debug!("{} '{}' already registered", asset.kind.as_str(), asset.handle);
                return true;
            }
            log::warn!(
                "conflicting registration for {} '{}', keeping the first declaration",
                asset.kind.as_str(),
                asset.handle
            );
            return false;
        }
        self.registered.insert(key, asset);
        true
    }

    /// Request inclusion of a previously registered handle. Unknown handles
    /// are rejected with a warning; repeat enqueues are deduplicated.
    pub fn enqueue(&mut self, kind: AssetKind, handle: &str) -> bool {
        let key = (kind, handle.to_string());
        if !self.registered.contains_key(&key) {
            log::warn!("cannot enqueue unregistered {} '{}'", kind.as_str(), handle);
            return false;
        }
        if self.enqueued_index.contains(&key) {
            return true;
        }
        self.enqueued_index.insert(key.clone());
        self.enqueued.push(key);
        true
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    pub fn enqueued_count(&self) -> usize {
        self.enqueued.len()
    }

    pub fn is_registered(&self, kind: AssetKind, handle: &str) -> bool {
        self.registered.contains_key(&(kind, handle.to_string()))
    }

    /// Drain the queue for one surface, in enqueue order, with each asset's
    /// registered same-kind dependencies ahead of it. Entries for other
    /// surfaces stay queued.
    pub fn flush(&mut self, surface: AssetSurface) -> Vec<Asset> {
        let mut output = Vec::new();
        let mut emitted: HashSet<(AssetKind, String)> = HashSet::new();
        let mut remaining = Vec::new();

        let queue = std::mem::take(&mut self.enqueued);
        for key in queue {
            let belongs = self
                .registered
                .get(&key)
                .map(|a| a.surface == surface)
                .unwrap_or(false);
            if belongs {
                self.emit(&key, surface, &mut emitted, &mut output);
                self.enqueued_index.remove(&key);
            } else {
                remaining.push(key);
            }
        }
        self.enqueued = remaining;
        output
    }

    fn emit(
        &self,
        key: &(AssetKind, String),
        surface: AssetSurface,
        emitted: &mut HashSet<(AssetKind, String)>,
        output: &mut Vec<Asset>,
    ) {
        if emitted.contains(key) {
            return;
        }
        let Some(asset) = self.registered.get(key) else {
            return;
        };
        if asset.surface != surface {
            return;
        }
        // Guard against dependency cycles: mark before recursing.
        emitted.insert(key.clone());
        for dep in &asset.deps {
            self.emit(&(key.0, dep.clone()), surface, emitted, output);
        }
        output.push(asset.clone());
    }
}

#[cfg(test)]
mod tests;
