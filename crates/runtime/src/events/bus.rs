//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::RuntimeEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Resolved cast attempts
    Cast,
    /// Cooldown expiry
    Cooldown,
    /// Selection cursor changes
    Selection,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Cast, Topic::Cooldown, Topic::Selection];
}

impl RuntimeEvent {
    pub fn topic(&self) -> Topic {
        match self {
            RuntimeEvent::CastResolved(_) => Topic::Cast,
            RuntimeEvent::CooldownExpired(_) => Topic::Cooldown,
            RuntimeEvent::SelectionChanged(_) => Topic::Selection,
        }
    }
}

struct Channels {
    cast: broadcast::Sender<RuntimeEvent>,
    cooldown: broadcast::Sender<RuntimeEvent>,
    selection: broadcast::Sender<RuntimeEvent>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<RuntimeEvent> {
        match topic {
            Topic::Cast => &self.cast,
            Topic::Cooldown => &self.cooldown,
            Topic::Selection => &self.selection,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; slow subscribers lag
/// and lose the oldest events.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
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
            channels: Arc::new(Channels {
                cast: broadcast::channel(capacity).0,
                cooldown: broadcast::channel(capacity).0,
                selection: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: RuntimeEvent) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "spell::events", ?topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RuntimeEvent> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<RuntimeEvent>> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CooldownExpired, SelectionChanged};
    use spell_core::{PlayerId, Tick};

    fn expired() -> RuntimeEvent {
        RuntimeEvent::CooldownExpired(CooldownExpired {
            player: PlayerId(1),
            spell: "Stupefy".into(),
            tick: Tick(1200),
        })
    }

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut cooldown = bus.subscribe(Topic::Cooldown);
        let mut selection = bus.subscribe(Topic::Selection);

        bus.publish(expired());

        assert_eq!(cooldown.try_recv().unwrap(), expired());
        assert!(selection.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::with_capacity(0);
        bus.publish(RuntimeEvent::SelectionChanged(SelectionChanged {
            player: PlayerId(1),
            spell: "Confundo".into(),
            index: 0,
        }));
    }
}
