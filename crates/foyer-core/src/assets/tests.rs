use super::{Asset, AssetKind, AssetPipeline, AssetSurface};

fn handles(assets: &[Asset]) -> Vec<&str> {
    assets.iter().map(|a| a.handle.as_str()).collect()
}

#[test]
fn test_register_then_enqueue_then_flush() {
    let mut pipeline = AssetPipeline::new();
    assert!(pipeline.register(Asset::script("app", "/assets/app.js", AssetSurface::Frontend)));
    assert!(pipeline.enqueue(AssetKind::Script, "app"));

    let flushed = pipeline.flush(AssetSurface::Frontend);
    assert_eq!(handles(&flushed), vec!["app"]);
    assert_eq!(pipeline.enqueued_count(), 0);
}

#[test]
fn test_identical_re_registration_is_noop() {
    let mut pipeline = AssetPipeline::new();
    let asset = Asset::style("theme", "/assets/theme.css", AssetSurface::Frontend);
    assert!(pipeline.register(asset.clone()));
    assert!(pipeline.register(asset));
    assert_eq!(pipeline.registered_count(), 1);
}

#[test]
fn test_conflicting_registration_rejected() {
    let mut pipeline = AssetPipeline::new();
    assert!(pipeline.register(Asset::script("app", "/assets/app.js", AssetSurface::Frontend)));
    assert!(!pipeline.register(Asset::script("app", "/assets/other.js", AssetSurface::Frontend)));
    assert!(pipeline.is_registered(AssetKind::Script, "app"));
}

#[test]
fn test_same_handle_different_kind_coexists() {
    let mut pipeline = AssetPipeline::new();
    assert!(pipeline.register(Asset::script("events", "/assets/events.js", AssetSurface::Frontend)));
    assert!(pipeline.register(Asset::style("events", "/assets/events.css", AssetSurface::Frontend)));
    assert_eq!(pipeline.registered_count(), 2);
}

#[test]
fn test_enqueue_unregistered_handle_rejected() {
    let mut pipeline = AssetPipeline::new();
    assert!(!pipeline.enqueue(AssetKind::Script, "ghost"));
    assert_eq!(pipeline.enqueued_count(), 0);
}

#[test]
fn test_enqueue_deduplicates() {
    let mut pipeline = AssetPipeline::new();
    pipeline.register(Asset::script("app", "/assets/app.js", AssetSurface::Frontend));
    assert!(pipeline.enqueue(AssetKind::Script, "app"));
    assert!(pipeline.enqueue(AssetKind::Script, "app"));
    assert_eq!(pipeline.enqueued_count(), 1);
}

#[test]
fn test_flush_expands_dependencies_first() {
    let mut pipeline = AssetPipeline::new();
    pipeline.register(Asset::script("vendor", "/assets/vendor.js", AssetSurface::Frontend));
    pipeline.register(
        Asset::script("app", "/assets/app.js", AssetSurface::Frontend).with_deps(&["vendor"]),
    );
    // Only the dependent is enqueued; its dependency rides along, first.
    pipeline.enqueue(AssetKind::Script, "app");

    let flushed = pipeline.flush(AssetSurface::Frontend);
    assert_eq!(handles(&flushed), vec!["vendor", "app"]);
}

#[test]
fn test_flush_deduplicates_shared_dependency() {
    let mut pipeline = AssetPipeline::new();
    pipeline.register(Asset::script("vendor", "/assets/vendor.js", AssetSurface::Frontend));
    pipeline.register(
        Asset::script("a", "/assets/a.js", AssetSurface::Frontend).with_deps(&["vendor"]),
    );
    pipeline.register(
        Asset::script("b", "/assets/b.js", AssetSurface::Frontend).with_deps(&["vendor"]),
    );
    pipeline.enqueue(AssetKind::Script, "a");
    pipeline.enqueue(AssetKind::Script, "b");

    let flushed = pipeline.flush(AssetSurface::Frontend);
    assert_eq!(handles(&flushed), vec!["vendor", "a", "b"]);
}

#[test]
fn test_flush_filters_by_surface() {
    let mut pipeline = AssetPipeline::new();
    pipeline.register(Asset::script("front", "/assets/front.js", AssetSurface::Frontend));
    pipeline.register(Asset::script("admin", "/assets/admin.js", AssetSurface::Admin));
    pipeline.enqueue(AssetKind::Script, "front");
    pipeline.enqueue(AssetKind::Script, "admin");

    let frontend = pipeline.flush(AssetSurface::Frontend);
    assert_eq!(handles(&frontend), vec!["front"]);
    // The admin entry stays queued for its own flush.
    assert_eq!(pipeline.enqueued_count(), 1);
    let admin = pipeline.flush(AssetSurface::Admin);
    assert_eq!(handles(&admin), vec!["admin"]);
}

#[test]
fn test_flush_survives_dependency_cycle() {
    let mut pipeline = AssetPipeline::new();
    pipeline.register(
        Asset::script("a", "/assets/a.js", AssetSurface::Frontend).with_deps(&["b"]),
    );
    pipeline.register(
        Asset::script("b", "/assets/b.js", AssetSurface::Frontend).with_deps(&["a"]),
    );
    pipeline.enqueue(AssetKind::Script, "a");

    let flushed = pipeline.flush(AssetSurface::Frontend);
    assert_eq!(handles(&flushed), vec!["b", "a"]);
}
