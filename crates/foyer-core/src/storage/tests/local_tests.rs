use serde_json::json;
use tempfile::tempdir;

use crate::storage::error::StorageSystemError;
use crate::storage::format::StorageFormat;
use crate::storage::local::LocalStore;
use crate::storage::provider::KeyValueStore;

fn create_store(fmt: StorageFormat) -> (tempfile::TempDir, LocalStore) {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = LocalStore::new(dir.path().join("data"), fmt).expect("Failed to create store");
    (dir, store)
}

#[test]
fn test_json_round_trip() {
    let (_dir, store) = create_store(StorageFormat::Json);
    store.set("modules.active", json!(["events"])).unwrap();
    assert_eq!(store.get("modules.active").unwrap(), Some(json!(["events"])));
}

#[test]
fn test_missing_key_is_none() {
    let (_dir, store) = create_store(StorageFormat::Json);
    assert_eq!(store.get("nope").unwrap(), None);
    assert!(!store.contains("nope").unwrap());
}

#[test]
fn test_value_survives_reopen() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("data");
    {
        let store = LocalStore::new(root.clone(), StorageFormat::Json).unwrap();
        store
            .set("modules.settings.tickets", json!({"currency": "EUR"}))
            .unwrap();
    }
    let store = LocalStore::new(root, StorageFormat::Json).unwrap();
    assert_eq!(
        store.get("modules.settings.tickets").unwrap(),
        Some(json!({"currency": "EUR"}))
    );
}

#[test]
fn test_overwrite_replaces_blob() {
    let (_dir, store) = create_store(StorageFormat::Json);
    store.set("k", json!({"a": 1})).unwrap();
    store.set("k", json!({"b": 2})).unwrap();
    assert_eq!(store.get("k").unwrap(), Some(json!({"b": 2})));
}

#[test]
fn test_invalid_key_rejected() {
    let (_dir, store) = create_store(StorageFormat::Json);
    let err = store.set("../escape", json!(1)).unwrap_err();
    assert!(matches!(err, StorageSystemError::InvalidKey(_)));
    let err = store.get("").unwrap_err();
    assert!(matches!(err, StorageSystemError::InvalidKey(_)));
}

#[test]
fn test_remove_deletes_file() {
    let (_dir, store) = create_store(StorageFormat::Json);
    store.set("k", json!(1)).unwrap();
    assert!(store.remove("k").unwrap());
    assert!(!store.contains("k").unwrap());
    assert!(!store.remove("k").unwrap());
}

#[test]
fn test_keys_strips_extension() {
    let (_dir, store) = create_store(StorageFormat::Json);
    store.set("modules.active", json!([])).unwrap();
    store.set("modules.settings.events", json!({})).unwrap();
    assert_eq!(
        store.keys().unwrap(),
        vec!["modules.active", "modules.settings.events"]
    );
}

#[cfg(feature = "toml-config")]
#[test]
fn test_toml_round_trip() {
    let (_dir, store) = create_store(StorageFormat::Toml);
    store.set("modules.active", json!(["events", "pwa"])).unwrap();
    assert_eq!(
        store.get("modules.active").unwrap(),
        Some(json!(["events", "pwa"]))
    );
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_yaml_round_trip() {
    let (_dir, store) = create_store(StorageFormat::Yaml);
    store.set("modules.settings.seo", json!({"noindex": true})).unwrap();
    assert_eq!(
        store.get("modules.settings.seo").unwrap(),
        Some(json!({"noindex": true}))
    );
}
