use std::sync::Arc;

use super::auth::{consume_token, issue_token, AdminSession, Capability};
use super::error::AdminSurfaceError;
use super::selection::{apply_selection, ModuleSelection};
use crate::module_system::registry::ModuleRegistry;
use crate::module_system::tests::mock::MockModule;
use crate::storage::memory::MemoryStore;

fn manager_session() -> AdminSession {
    AdminSession::with_capabilities(&[Capability::ManageModules])
}

fn registry_with_modules(store: &Arc<MemoryStore>) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new(store.clone());
    registry.register(Arc::new(MockModule::new("events").default_enabled()));
    registry.register(Arc::new(MockModule::with_deps("tickets", &["events"])));
    registry.register(Arc::new(MockModule::new("seo")));
    registry
}

fn selection(store: &Arc<MemoryStore>, ids: &[&str]) -> ModuleSelection {
    ModuleSelection {
        active_ids: ids.iter().map(|id| id.to_string()).collect(),
        token: issue_token(store.as_ref()).unwrap(),
    }
}

#[test]
fn test_token_is_single_use() {
    let store = MemoryStore::new();
    let token = issue_token(&store).unwrap();
    assert!(consume_token(&store, &token));
    assert!(!consume_token(&store, &token));
}

#[test]
fn test_malformed_token_rejected() {
    let store = MemoryStore::new();
    assert!(!consume_token(&store, ""));
    assert!(!consume_token(&store, "../modules.active"));
}

#[test]
fn test_capability_required() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = registry_with_modules(&store);
    let selection = selection(&store, &["events"]);

    let err = apply_selection(
        &mut registry,
        store.as_ref(),
        &AdminSession::anonymous(),
        &selection,
    )
    .unwrap_err();
    assert!(matches!(err, AdminSurfaceError::MissingCapability(_)));
}

#[test]
fn test_stale_token_rejected() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = registry_with_modules(&store);
    let selection = ModuleSelection {
        active_ids: vec!["events".to_string()],
        token: "deadbeef".to_string(),
    };

    let err = apply_selection(&mut registry, store.as_ref(), &manager_session(), &selection)
        .unwrap_err();
    assert!(matches!(err, AdminSurfaceError::InvalidToken));
}

#[test]
fn test_diff_applies_activations_and_deactivations() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = registry_with_modules(&store);
    // Current: events (default). Desired: tickets+events, in dependency
    // order as submitted by the form.
    let selection = selection(&store, &["events", "tickets"]);

    let outcome =
        apply_selection(&mut registry, store.as_ref(), &manager_session(), &selection).unwrap();
    assert_eq!(outcome.activated, 1);
    assert_eq!(outcome.deactivated, 0);
    assert_eq!(outcome.failed, 0);
    assert!(registry.is_active("tickets"));
}

#[test]
fn test_unchecked_modules_are_deactivated() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = registry_with_modules(&store);
    registry.activate("tickets");

    // Keep only events active.
    let selection = selection(&store, &["events"]);
    let outcome =
        apply_selection(&mut registry, store.as_ref(), &manager_session(), &selection).unwrap();
    assert_eq!(outcome.deactivated, 1);
    assert!(!registry.is_active("tickets"));
    assert!(registry.is_active("events"));
}

#[test]
fn test_dependent_chain_deactivates_in_reverse_order() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = registry_with_modules(&store);
    registry.activate("tickets");

    // Deselect everything. tickets must release events first; reverse
    // activation order makes both succeed in one submission.
    let selection = selection(&store, &[]);
    let outcome =
        apply_selection(&mut registry, store.as_ref(), &manager_session(), &selection).unwrap();
    assert_eq!(outcome.deactivated, 2);
    assert_eq!(outcome.failed, 0);
    assert!(registry.active_set().is_empty());
}

#[test]
fn test_failed_activation_is_counted_not_thrown() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = registry_with_modules(&store);
    registry.deactivate("events");

    // tickets without its dependency: the diff tries and fails, the form
    // round-trip itself still succeeds with a generic outcome.
    let selection = selection(&store, &["tickets"]);
    let outcome =
        apply_selection(&mut registry, store.as_ref(), &manager_session(), &selection).unwrap();
    assert_eq!(outcome.activated, 0);
    assert_eq!(outcome.failed, 1);
    assert!(!registry.is_active("tickets"));
}

#[test]
fn test_unregistered_ids_in_selection_ignored() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = registry_with_modules(&store);
    let selection = selection(&store, &["events", "ghost"]);

    let outcome =
        apply_selection(&mut registry, store.as_ref(), &manager_session(), &selection).unwrap();
    assert_eq!(outcome.failed, 0);
    assert!(!registry.active_set().iter().any(|id| id == "ghost"));
}

#[test]
fn test_noop_selection_changes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = registry_with_modules(&store);
    let selection = selection(&store, &["events"]);

    let outcome =
        apply_selection(&mut registry, store.as_ref(), &manager_session(), &selection).unwrap();
    assert_eq!(outcome.changed(), 0);
}
