use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::admin::auth::{consume_token, AdminSession, Capability};
use crate::admin::error::AdminSurfaceError;
use crate::module_system::registry::ModuleRegistry;
use crate::storage::provider::KeyValueStore;

/// A submitted module-selection form: the ids to keep active plus the
/// single-use token minted when the form was rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSelection {
    pub active_ids: Vec<String>,
    pub token: String,
}

/// Generic outcome counts. Per-module failures surface only as log entries;
/// the admin page shows one undifferentiated message either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionOutcome {
    pub activated: usize,
    pub deactivated: usize,
    pub failed: usize,
}

impl SelectionOutcome {
    pub fn changed(&self) -> usize {
        self.activated + self.deactivated
    }
}

/// Apply a submitted selection: verify the capability and token, then diff
/// desired-vs-current activation for every registered module and call
/// `activate`/`deactivate` accordingly.
///
/// Deactivations run first, in reverse activation order so dependents
/// release their dependencies; activations then run in the submitted order.
pub fn apply_selection(
    registry: &mut ModuleRegistry,
    store: &dyn KeyValueStore,
    session: &AdminSession,
    selection: &ModuleSelection,
) -> Result<SelectionOutcome, AdminSurfaceError> {
    if !session.can(Capability::ManageModules) {
        return Err(AdminSurfaceError::MissingCapability(
            Capability::ManageModules.as_str(),
        ));
    }
    if !consume_token(store, &selection.token) {
        return Err(AdminSurfaceError::InvalidToken);
    }

    let registered: HashSet<String> = registry.get_all().keys().cloned().collect();
    let desired: HashSet<&str> = selection
        .active_ids
        .iter()
        .map(|id| id.as_str())
        .filter(|id| {
            let known = registered.contains(*id);
            if !known {
                log::warn!("selection names unregistered module '{}', ignoring", id);
            }
            known
        })
        .collect();

    let mut outcome = SelectionOutcome::default();

    let to_deactivate: Vec<String> = registry
        .active_set()
        .iter()
        .rev()
        .filter(|id| registered.contains(*id) && !desired.contains(id.as_str()))
        .cloned()
        .collect();
    for id in to_deactivate {
        if registry.deactivate(&id) {
            outcome.deactivated += 1;
        } else {
            outcome.failed += 1;
        }
    }

    for id in &selection.active_ids {
        if !desired.contains(id.as_str()) {
            continue;
        }
        if registry.is_active(id) || registry.active_set().contains(id) {
            continue;
        }
        if registry.activate(id) {
            outcome.activated += 1;
        } else {
            outcome.failed += 1;
        }
    }

    Ok(outcome)
}
