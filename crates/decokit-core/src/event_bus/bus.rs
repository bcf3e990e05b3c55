//! Bus plumbing: handler registry plus a broadcast channel.

use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};
use crate::constants::EVENT_CHANNEL_CAPACITY;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = self.0.simple().to_string();
        write!(f, "sub-{}", &id[..8])
    }
}

/// Which categories a handler wants to see.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(wanted) => wanted.contains(&event.category()),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// Neither a handler nor a receiver saw the event.
    #[error("No active subscribers")]
    NoSubscribers,
}

type Handler = Box<dyn Fn(AppEvent) + Send + Sync>;

/// Publish/subscribe hub shared by the document, history, filter and view
/// layers. Handlers run inline on the publishing thread. Receivers get a
/// clone of every event through a bounded broadcast channel and may lag.
pub struct EventBus {
    handlers: RwLock<HashMap<SubscriptionId, (EventFilter, Handler)>>,
    channel: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_CHANNEL_CAPACITY)
    }

    /// Bus whose broadcast channel buffers `capacity` events per receiver.
    pub fn with_capacity(capacity: usize) -> Self {
        let (channel, _) = broadcast::channel(capacity.max(1));
        Self {
            handlers: RwLock::new(HashMap::new()),
            channel,
        }
    }

    /// Deliver `event` to matching handlers, then to every receiver.
    ///
    /// Returns the number of receivers reached. Fails only when nobody at all
    /// is listening.
    pub fn publish(&self, event: AppEvent) -> Result<usize, EventBusError> {
        tracing::trace!("Publishing {}", event.description());

        let handlers = self.handlers.read();
        handlers
            .values()
            .filter(|(filter, _)| filter.matches(&event))
            .for_each(|(_, handler)| handler(event.clone()));

        match self.channel.send(event) {
            Ok(receivers) => Ok(receivers),
            Err(_) if handlers.is_empty() => Err(EventBusError::NoSubscribers),
            Err(_) => Ok(0),
        }
    }

    /// Register a synchronous handler. It must not publish to or subscribe
    /// on this bus.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Returns true if `id` was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Number of synchronous handlers.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Async consumer of every event published from now on.
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.channel.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.subscriber_count())
            .field("receivers", &self.channel.receiver_count())
            .finish()
    }
}
