//! Topic subscription registry
//!
//! Inbound stream events carry a topic name in their `type` field; the
//! registry maps topic names to sets of subscriber callbacks and fans each
//! decoded event out to every callback registered for its topic.
//!
//! # Set Semantics
//!
//! Closures have no useful equality in Rust, so callbacks are registered as
//! [`EventCallback`] handles whose identity is the shared pointer inside.
//! Cloning a handle preserves identity: registering the same handle twice is
//! a no-op, and `remove` with a clone of the registered handle removes it.
//!
//! # Dispatch
//!
//! Dispatch snapshots the subscriber set under the registry lock and invokes
//! the callbacks after releasing it, so a callback may subscribe or
//! unsubscribe without deadlocking. A subscriber removed mid-dispatch may
//! still see the event already in flight; the snapshot taken at dispatch
//! time is authoritative.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;
use vitalstream_core::WireEvent;

type CallbackFn =
    Arc<dyn Fn(WireEvent) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Cloneable handle to an async event callback
///
/// The handle is what gives a callback identity for subscribe/unsubscribe:
/// keep a clone of the handle you registered if you intend to remove it
/// later.
///
/// # Examples
///
/// ```rust
/// use vitalstream_client::EventCallback;
///
/// let on_update = EventCallback::new(|event| async move {
///     println!("{}: {}", event.event_type, event.data);
/// });
/// let same = on_update.clone();
/// assert!(on_update.same_callback(&same));
/// ```
#[derive(Clone)]
pub struct EventCallback {
    inner: CallbackFn,
}

impl EventCallback {
    /// Wrap an async closure as a callback handle
    pub fn new<F, Fut>(callback: F) -> Self
    where
        F: Fn(WireEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |event| Box::pin(callback(event))),
        }
    }

    /// Whether two handles refer to the same registered callback
    pub fn same_callback(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    async fn invoke(&self, event: WireEvent) {
        (self.inner)(event).await;
    }
}

impl std::fmt::Debug for EventCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventCallback({:p})", Arc::as_ptr(&self.inner))
    }
}

/// Registry mapping topic names to subscriber callbacks
#[derive(Clone, Default)]
pub struct TopicRegistry {
    topics: Arc<Mutex<HashMap<String, Vec<EventCallback>>>>,
}

impl TopicRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback under a topic
    ///
    /// Registering a handle already present for the topic is a no-op.
    pub async fn add(&self, topic: impl Into<String>, callback: &EventCallback) {
        let mut topics = self.topics.lock().await;
        let subscribers = topics.entry(topic.into()).or_default();
        if !subscribers.iter().any(|c| c.same_callback(callback)) {
            subscribers.push(callback.clone());
        }
    }

    /// Remove a callback from a topic; no-op when absent
    pub async fn remove(&self, topic: &str, callback: &EventCallback) {
        let mut topics = self.topics.lock().await;
        if let Some(subscribers) = topics.get_mut(topic) {
            subscribers.retain(|c| !c.same_callback(callback));
            if subscribers.is_empty() {
                topics.remove(topic);
            }
        }
    }

    /// Number of callbacks currently registered for a topic
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .lock()
            .await
            .get(topic)
            .map(|s| s.len())
            .unwrap_or(0)
    }

    /// Topics that currently have at least one subscriber
    pub async fn topics(&self) -> Vec<String> {
        self.topics.lock().await.keys().cloned().collect()
    }

    /// Fan an event out to every callback registered for its topic
    ///
    /// Events for topics with no subscribers are dropped silently; the
    /// server pushes topics the dashboard may not care about.
    pub async fn dispatch(&self, event: WireEvent) {
        let snapshot: Vec<EventCallback> = {
            let topics = self.topics.lock().await;
            match topics.get(&event.event_type) {
                Some(subscribers) => subscribers.clone(),
                None => return,
            }
        };

        for callback in snapshot {
            callback.invoke(event.clone()).await;
        }
    }
}
