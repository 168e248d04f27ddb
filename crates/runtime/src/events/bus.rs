//! Topic-based event bus implementation.

use loot_core::{RegionId, StashEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{DropReport, InputEvent};
use crate::value::ValueDisplay;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Items moved, merged, loaded, destroyed; drop results
    Placement,
    /// Region totals
    Value,
    /// Search progress and reveals
    Search,
    /// Pointer and keyboard gestures
    Input,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Stash(StashEvent),
    Drop(DropReport),
    Input(InputEvent),
    /// Formatted total of a region after a value change.
    Value {
        region: RegionId,
        display: ValueDisplay,
    },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Stash(StashEvent::ValueChanged { .. }) | Event::Value { .. } => Topic::Value,
            Event::Stash(StashEvent::Revealed { .. }) => Topic::Search,
            Event::Stash(_) | Event::Drop(_) => Topic::Placement,
            Event::Input(_) => Topic::Input,
        }
    }
}

/// Topic-based event bus
///
/// Channels are created up front, one per topic, so publishing never waits
/// on a lock. Delivery is best effort: events sent while a topic has no
/// subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    placement: broadcast::Sender<Event>,
    value: broadcast::Sender<Event>,
    search: broadcast::Sender<Event>,
    input: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            placement: broadcast::channel(capacity).0,
            value: broadcast::channel(capacity).0,
            search: broadcast::channel(capacity).0,
            input: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Placement => &self.placement,
            Topic::Value => &self.value,
            Topic::Search => &self.search,
            Topic::Input => &self.input,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
