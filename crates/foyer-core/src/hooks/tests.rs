use std::sync::{Arc, Mutex};

use super::dispatcher::SharedHookDispatcher;
use super::error::HookSystemError;
use super::HostHook;

type Trace = Arc<Mutex<Vec<String>>>;

fn recording_callback(
    trace: &Trace,
    label: &str,
) -> Box<dyn Fn(HostHook) -> super::dispatcher::BoxFuture + Send + Sync> {
    let trace = Arc::clone(trace);
    let label = label.to_string();
    Box::new(move |_hook| {
        let trace = Arc::clone(&trace);
        let label = label.clone();
        Box::pin(async move {
            trace.lock().unwrap().push(label);
            Ok(())
        })
    })
}

fn failing_callback(
    hook: HostHook,
) -> Box<dyn Fn(HostHook) -> super::dispatcher::BoxFuture + Send + Sync> {
    Box::new(move |_| {
        Box::pin(async move { Err(HookSystemError::handler(hook, "broken", "boom")) })
    })
}

#[tokio::test]
async fn test_fire_without_handlers_is_trivial() {
    let dispatcher = SharedHookDispatcher::new();
    assert!(dispatcher.fire(HostHook::ApiRoutesInit).await.is_ok());
}

#[tokio::test]
async fn test_priority_order_overrides_registration_order() {
    let dispatcher = SharedHookDispatcher::new();
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));

    // Registered enqueue-first, but the register pass has the lower value.
    dispatcher
        .add_action(
            HostHook::FrontendAssetEnqueue,
            20,
            recording_callback(&trace, "enqueue"),
        )
        .await;
    dispatcher
        .add_action(
            HostHook::FrontendAssetEnqueue,
            10,
            recording_callback(&trace, "register"),
        )
        .await;

    dispatcher.fire(HostHook::FrontendAssetEnqueue).await.unwrap();
    assert_eq!(*trace.lock().unwrap(), vec!["register", "enqueue"]);
}

#[tokio::test]
async fn test_equal_priority_preserves_registration_order() {
    let dispatcher = SharedHookDispatcher::new();
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));
    for label in ["first", "second", "third"] {
        dispatcher
            .add_action(HostHook::UiExtensionsInit, 10, recording_callback(&trace, label))
            .await;
    }
    dispatcher.fire(HostHook::UiExtensionsInit).await.unwrap();
    assert_eq!(*trace.lock().unwrap(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_handlers_are_scoped_to_their_hook() {
    let dispatcher = SharedHookDispatcher::new();
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));
    dispatcher
        .add_action(HostHook::ApiRoutesInit, 10, recording_callback(&trace, "routes"))
        .await;

    dispatcher.fire(HostHook::ContentExtensionsInit).await.unwrap();
    assert!(trace.lock().unwrap().is_empty());
    dispatcher.fire(HostHook::ApiRoutesInit).await.unwrap();
    assert_eq!(*trace.lock().unwrap(), vec!["routes"]);
}

#[tokio::test]
async fn test_first_error_aborts_the_pass() {
    let dispatcher = SharedHookDispatcher::new();
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));
    dispatcher
        .add_action(HostHook::ApiRoutesInit, 10, recording_callback(&trace, "before"))
        .await;
    dispatcher
        .add_action(HostHook::ApiRoutesInit, 20, failing_callback(HostHook::ApiRoutesInit))
        .await;
    dispatcher
        .add_action(HostHook::ApiRoutesInit, 30, recording_callback(&trace, "after"))
        .await;

    let err = dispatcher.fire(HostHook::ApiRoutesInit).await.unwrap_err();
    assert!(matches!(err, HookSystemError::HandlerFailed { .. }));
    // The callback after the failure never ran.
    assert_eq!(*trace.lock().unwrap(), vec!["before"]);
}

#[tokio::test]
async fn test_remove_action() {
    let dispatcher = SharedHookDispatcher::new();
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));
    let id = dispatcher
        .add_action(HostHook::EarlyBoot, 10, recording_callback(&trace, "gone"))
        .await;
    assert!(dispatcher.remove_action(id).await);
    assert!(!dispatcher.remove_action(id).await);
    assert_eq!(dispatcher.handler_count(HostHook::EarlyBoot).await, 0);

    dispatcher.fire(HostHook::EarlyBoot).await.unwrap();
    assert!(trace.lock().unwrap().is_empty());
}

#[test]
fn test_request_pipeline_names() {
    assert_eq!(HostHook::REQUEST_PIPELINE.len(), 8);
    assert_eq!(HostHook::EarlyBoot.name(), "early-boot");
    assert_eq!(HostHook::FrontendAssetRegister.name(), "frontend-asset-register");
    assert_eq!(HostHook::AdminAssetEnqueue.name(), "admin-asset-enqueue");
    assert_eq!(HostHook::REQUEST_PIPELINE[0], HostHook::EarlyBoot);
}
