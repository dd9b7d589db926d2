use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::kernel::constants::ACTIVE_SET_KEY;
use crate::module_system::settings::{SettingsSchema, SettingsStore};
use crate::module_system::traits::ExtensionModule;
use crate::storage::provider::KeyValueStore;

/// Activation transitions reported to registered observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStateChange {
    Activated { id: String },
    Deactivated { id: String },
}

/// Observer callback invoked after a completed activation transition
pub type StateChangeObserver = Box<dyn Fn(&ModuleStateChange) + Send + Sync>;

/// Diagnostic projection of one registered module, consumed by the admin
/// collaborator and the CLI
#[derive(Debug, Clone, Serialize)]
pub struct ModuleInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub dependencies: Vec<String>,
    pub default_enabled: bool,
    pub active: bool,
    pub dependencies_met: bool,
    pub settings_schema: SettingsSchema,
}

/// Request-scoped catalog of registered modules plus the persisted active set.
///
/// The catalog is rebuilt fresh every request; the active set is the single
/// source of truth for "is this module turned on", loaded once at
/// construction and rewritten wholesale on every mutation. Concurrent
/// requests mutating activation state race last-writer-wins; activation
/// changes are rare, operator-driven events and the store carries no
/// compare-and-swap.
///
/// No operation here returns an error for expected misuse. Duplicate ids,
/// unknown modules, unmet dependencies and blocked deactivations all come
/// back as `false` with a log line, so a configuration mistake can never
/// abort the host boot sequence.
pub struct ModuleRegistry {
    modules: HashMap<String, Arc<dyn ExtensionModule>>,
    active_set: Vec<String>,
    store: Arc<dyn KeyValueStore>,
    settings: SettingsStore,
    observers: Vec<StateChangeObserver>,
}

impl ModuleRegistry {
    /// Create a registry over the given store, loading the persisted active
    /// set. A missing or malformed entry yields an empty set.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let active_set = match store.get(ACTIVE_SET_KEY) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                log::error!("discarding malformed active set: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::error!("failed to load active set: {}", e);
                Vec::new()
            }
        };
        let settings = SettingsStore::new(Arc::clone(&store));
        Self {
            modules: HashMap::new(),
            active_set,
            store,
            settings,
            observers: Vec::new(),
        }
    }

    /// Register a module. Returns false and leaves the registry unchanged if
    /// the id is already taken. A `default_enabled` module is appended to
    /// the active set (and persisted) the first time it is registered.
    pub fn register(&mut self, module: Arc<dyn ExtensionModule>) -> bool {
        let id = module.id().to_string();
        if self.modules.contains_key(&id) {
            log::warn!("duplicate module id '{}', ignoring re-registration", id);
            return false;
        }
        if semver::Version::parse(module.version()).is_err() {
            // Informational only; the module still registers.
            log::debug!(
                "module '{}' declares non-semver version '{}'",
                id,
                module.version()
            );
        }
        let default_enabled = module.default_enabled();
        self.modules.insert(id.clone(), module);
        if default_enabled && !self.in_active_set(&id) {
            self.active_set.push(id);
            self.persist_active_set();
        }
        true
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn ExtensionModule>> {
        self.modules.get(id).cloned()
    }

    pub fn get_all(&self) -> &HashMap<String, Arc<dyn ExtensionModule>> {
        &self.modules
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// The persisted activation list, in activation order. May reference ids
    /// with no registered module this request; those are excluded from
    /// `get_active`, not errors.
    pub fn active_set(&self) -> &[String] {
        &self.active_set
    }

    fn in_active_set(&self, id: &str) -> bool {
        self.active_set.iter().any(|a| a == id)
    }

    /// A module is active iff it is registered, its id is in the active set,
    /// and every direct dependency is met.
    pub fn is_active(&self, id: &str) -> bool {
        self.modules.contains_key(id) && self.in_active_set(id) && self.dependencies_met(id)
    }

    /// Direct membership check only: each dependency must be registered and
    /// present in the active set. Dependencies of dependencies are not
    /// re-verified; a deeper chain can hide an unsatisfied module, and that
    /// one-level behavior is load-bearing for activation outcomes.
    pub fn dependencies_met(&self, id: &str) -> bool {
        let Some(module) = self.modules.get(id) else {
            return false;
        };
        module
            .dependencies()
            .iter()
            .all(|dep| self.modules.contains_key(dep) && self.in_active_set(dep))
    }

    /// Active modules in activation order. Stale active-set entries with no
    /// registered module this request are silently excluded.
    pub fn get_active(&self) -> Vec<Arc<dyn ExtensionModule>> {
        self.active_set
            .iter()
            .filter(|id| self.is_active(id.as_str()))
            .filter_map(|id| self.modules.get(id).cloned())
            .collect()
    }

    /// Turn a module on. Fails (false, error logged) for an unknown id or an
    /// unmet direct dependency; succeeds as a no-op when the id is already in
    /// the active set. On a real transition the new set is persisted, the
    /// module's `on_activate` fires exactly once, and observers are signaled.
    pub fn activate(&mut self, id: &str) -> bool {
        let Some(module) = self.modules.get(id).cloned() else {
            log::error!("cannot activate unknown module '{}'", id);
            return false;
        };
        if !self.dependencies_met(id) {
            let missing = module
                .dependencies()
                .into_iter()
                .find(|dep| !self.modules.contains_key(dep) || !self.in_active_set(dep))
                .unwrap_or_default();
            log::error!(
                "cannot activate '{}': dependency '{}' is not active",
                id,
                missing
            );
            return false;
        }
        if self.in_active_set(id) {
            return true;
        }
        self.active_set.push(id.to_string());
        self.persist_active_set();
        if let Err(e) = module.on_activate(self.store.as_ref()) {
            // The membership transition already happened and stands.
            log::error!("{}", e);
        }
        self.notify(ModuleStateChange::Activated { id: id.to_string() });
        true
    }

    /// Turn a module off. Fails for an unknown id, or when any other
    /// currently-active module lists `id` as a dependency. Removing an id
    /// that is not in the active set is a no-op. On a real transition the
    /// set is persisted, `on_deactivate` fires exactly once, and observers
    /// are signaled.
    pub fn deactivate(&mut self, id: &str) -> bool {
        if !self.modules.contains_key(id) {
            log::error!("cannot deactivate unknown module '{}'", id);
            return false;
        }
        for (other_id, other) in &self.modules {
            if other_id != id
                && other.dependencies().iter().any(|dep| dep == id)
                && self.is_active(other_id)
            {
                log::error!(
                    "cannot deactivate '{}': required by active module '{}'",
                    id,
                    other_id
                );
                return false;
            }
        }
        if !self.in_active_set(id) {
            log::debug!("module '{}' is already inactive", id);
            return true;
        }
        self.active_set.retain(|a| a != id);
        self.persist_active_set();
        if let Some(module) = self.modules.get(id) {
            if let Err(e) = module.on_deactivate(self.store.as_ref()) {
                log::error!("{}", e);
            }
        }
        self.notify(ModuleStateChange::Deactivated { id: id.to_string() });
        true
    }

    /// Register an observer signaled after each completed activation
    /// transition
    pub fn subscribe(&mut self, observer: StateChangeObserver) {
        self.observers.push(observer);
    }

    fn notify(&self, change: ModuleStateChange) {
        for observer in &self.observers {
            observer(&change);
        }
    }

    /// Diagnostic projection over every registered module
    pub fn get_modules_info(&self) -> BTreeMap<String, ModuleInfo> {
        self.modules
            .iter()
            .map(|(id, module)| {
                let info = ModuleInfo {
                    name: module.name().to_string(),
                    description: module.description().to_string(),
                    version: module.version().to_string(),
                    dependencies: module.dependencies(),
                    default_enabled: module.default_enabled(),
                    active: self.is_active(id),
                    dependencies_met: self.dependencies_met(id),
                    settings_schema: module.settings_schema(),
                };
                (id.clone(), info)
            })
            .collect()
    }

    /// The lazily-loading per-module settings store backed by the same
    /// key-value store as the active set
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    fn persist_active_set(&self) {
        let value = Value::from(self.active_set.clone());
        if let Err(e) = self.store.set(ACTIVE_SET_KEY, value) {
            log::error!("failed to persist active set: {}", e);
        }
    }
}
