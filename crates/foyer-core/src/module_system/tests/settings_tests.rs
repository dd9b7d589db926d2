use std::sync::Arc;

use serde_json::json;

use crate::module_system::settings::{SettingsData, SettingsStore};
use crate::storage::memory::MemoryStore;
use crate::storage::provider::KeyValueStore;

#[test]
fn test_load_missing_settings_yields_empty() {
    let store = Arc::new(MemoryStore::new());
    let settings = SettingsStore::new(store);
    assert!(settings.load("events").is_empty());
}

#[test]
fn test_load_reads_persisted_blob() {
    let store = Arc::new(MemoryStore::new());
    store
        .set("modules.settings.events", json!({"per_page": 25}))
        .unwrap();
    let settings = SettingsStore::new(store);
    assert_eq!(settings.load("events").get_or("per_page", 10), 25);
}

#[test]
fn test_update_rewrites_blob_wholesale() {
    let store = Arc::new(MemoryStore::new());
    store
        .set("modules.settings.events", json!({"per_page": 25, "view": "list"}))
        .unwrap();
    let settings = SettingsStore::new(store.clone());

    let mut data = SettingsData::new();
    data.set("per_page", 50).unwrap();
    settings.update("events", data).unwrap();

    // The previous blob is replaced entirely; no merge.
    assert_eq!(
        store.get("modules.settings.events").unwrap(),
        Some(json!({"per_page": 50}))
    );
}

#[test]
fn test_update_with_read_modify_write() {
    let store = Arc::new(MemoryStore::new());
    let settings = SettingsStore::new(store.clone());
    settings
        .update_with("tickets", |data| {
            data.set("currency", "EUR").unwrap();
        })
        .unwrap();
    settings
        .update_with("tickets", |data| {
            data.set("stock_cap", 250).unwrap();
        })
        .unwrap();
    assert_eq!(
        store.get("modules.settings.tickets").unwrap(),
        Some(json!({"currency": "EUR", "stock_cap": 250}))
    );
}

#[test]
fn test_malformed_blob_falls_back_to_defaults() {
    let store = Arc::new(MemoryStore::new());
    store.set("modules.settings.seo", json!("scalar")).unwrap();
    let settings = SettingsStore::new(store);
    assert!(settings.load("seo").is_empty());
}

#[test]
fn test_cache_serves_repeat_loads() {
    let store = Arc::new(MemoryStore::new());
    store
        .set("modules.settings.pwa", json!({"theme_color": "#111111"}))
        .unwrap();
    let settings = SettingsStore::new(store.clone());
    assert_eq!(
        settings.load("pwa").get::<String>("theme_color").as_deref(),
        Some("#111111")
    );

    // Mutate the store behind the cache; the cached copy wins until update.
    store
        .set("modules.settings.pwa", json!({"theme_color": "#222222"}))
        .unwrap();
    assert_eq!(
        settings.load("pwa").get::<String>("theme_color").as_deref(),
        Some("#111111")
    );
}

#[test]
fn test_typed_getters() {
    let mut data = SettingsData::new();
    data.set("per_page", 12).unwrap();
    data.set("show_past", true).unwrap();
    assert_eq!(data.get_or("per_page", 10), 12);
    assert_eq!(data.get_or("missing", 10), 10);
    assert_eq!(data.get::<bool>("show_past"), Some(true));
    // Wrong type falls through to the default.
    assert_eq!(data.get_or::<String>("per_page", "x".to_string()), "x");
}
