use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::hooks::error::HookSystemError;
use crate::hooks::{HookId, HostHook};

/// Owned future returned by a hook callback
pub type BoxFuture = Pin<Box<dyn Future<Output = Result<(), HookSystemError>> + Send + 'static>>;

/// A deferred callback attached to a host lifecycle event
pub type HookCallback = Box<dyn Fn(HostHook) -> BoxFuture + Send + Sync>;

struct HookEntry {
    id: HookId,
    priority: u32,
    callback: HookCallback,
}

impl fmt::Debug for HookEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookEntry")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Priority-ordered dispatcher over the host lifecycle events (internal,
/// wrapped by [`SharedHookDispatcher`]).
#[derive(Default)]
pub struct HookDispatcher {
    handlers: HashMap<HostHook, Vec<HookEntry>>,
    next_id: HookId,
}

impl fmt::Debug for HookDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handler_count: usize = self.handlers.values().map(|v| v.len()).sum();
        f.debug_struct("HookDispatcher")
            .field("handler_count", &handler_count)
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl HookDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a callback to a lifecycle event. Lower priority values fire
    /// first; equal priorities fire in registration order.
    pub fn add_action(&mut self, hook: HostHook, priority: u32, callback: HookCallback) -> HookId {
        self.next_id += 1;
        let id = self.next_id;
        self.handlers.entry(hook).or_default().push(HookEntry {
            id,
            priority,
            callback,
        });
        id
    }

    pub fn remove_action(&mut self, id: HookId) -> bool {
        let mut found = false;
        self.handlers.values_mut().for_each(|entries| {
            let len_before = entries.len();
            entries.retain(|e| e.id != id);
            if entries.len() < len_before {
                found = true;
            }
        });
        found
    }

    pub fn handler_count(&self, hook: HostHook) -> usize {
        self.handlers.get(&hook).map_or(0, |v| v.len())
    }

    /// Invoke every callback attached to `hook` in priority order. The first
    /// error aborts the pass and propagates; callbacks later in the order do
    /// not run. An event with no handlers fires trivially.
    pub async fn fire(&self, hook: HostHook) -> Result<(), HookSystemError> {
        let Some(entries) = self.handlers.get(&hook) else {
            return Ok(());
        };
        let mut ordered: Vec<&HookEntry> = entries.iter().collect();
        ordered.sort_by_key(|e| (e.priority, e.id));
        for entry in ordered {
            (entry.callback)(hook).await?;
        }
        Ok(())
    }
}

/// Thread-safe shared dispatcher handle
#[derive(Clone, Debug)]
pub struct SharedHookDispatcher {
    inner: Arc<Mutex<HookDispatcher>>,
}

impl SharedHookDispatcher {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HookDispatcher::new())),
        }
    }

    pub async fn add_action(&self, hook: HostHook, priority: u32, callback: HookCallback) -> HookId {
        self.inner.lock().await.add_action(hook, priority, callback)
    }

    pub async fn remove_action(&self, id: HookId) -> bool {
        self.inner.lock().await.remove_action(id)
    }

    pub async fn handler_count(&self, hook: HostHook) -> usize {
        self.inner.lock().await.handler_count(hook)
    }

    pub async fn fire(&self, hook: HostHook) -> Result<(), HookSystemError> {
        let dispatcher = self.inner.lock().await;
        dispatcher.fire(hook).await
    }
}

impl Default for SharedHookDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
