use crate::domain::ports::Listener;
use crate::error::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Handle returned by [`ListenerRegistry::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Entry<E> = (SubscriptionId, Arc<dyn Listener<E>>);

/// Fan-out of events to subscribed listeners, in subscription order.
///
/// The subscriber list is behind a `RwLock`, so a registry can be shared
/// between tasks. Listeners are called without holding the lock.
pub struct ListenerRegistry<E> {
    listeners: RwLock<Vec<Entry<E>>>,
    next_id: AtomicU64,
}

impl<E: Send + Sync + 'static> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Send + Sync + 'static> ListenerRegistry<E> {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Builds a registry already holding `listeners`, in the given order.
    pub fn with_listeners(listeners: Vec<Arc<dyn Listener<E>>>) -> Self {
        let entries: Vec<Entry<E>> = listeners
            .into_iter()
            .zip(1..)
            .map(|(listener, id)| (SubscriptionId(id), listener))
            .collect();
        let next_id = entries.len() as u64 + 1;
        Self {
            listeners: RwLock::new(entries),
            next_id: AtomicU64::new(next_id),
        }
    }

    fn allocate_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub async fn subscribe(&self, listener: Arc<dyn Listener<E>>) -> SubscriptionId {
        let id = self.allocate_id();
        self.listeners.write().await.push((id, listener));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().await;
        let before = listeners.len();
        listeners.retain(|(entry_id, _)| *entry_id != id);
        listeners.len() != before
    }

    pub async fn len(&self) -> usize {
        self.listeners.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.listeners.read().await.is_empty()
    }

    /// Notifies every listener in order. The first listener error stops the
    /// fan-out and is returned as is.
    pub async fn notify_all(&self, event: &E) -> Result<()> {
        let snapshot: Vec<Arc<dyn Listener<E>>> = self
            .listeners
            .read()
            .await
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in snapshot {
            listener.notify(event).await?;
        }
        Ok(())
    }
}
