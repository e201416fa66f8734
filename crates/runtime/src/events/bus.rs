//! Broadcast channels keyed by [`Topic`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::broadcast;

use super::types::{AccessEvent, VisitEvent};

/// Event stream a subscriber can pick.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Actor entering or leaving the zone
    Visit,
    /// Credential checks and phase changes
    Access,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::Visit, Topic::Access];
}

/// Any event the kiosk publishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Visit(VisitEvent),
    Access(AccessEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Visit(_) => Topic::Visit,
            Event::Access(_) => Topic::Access,
        }
    }
}

impl From<VisitEvent> for Event {
    fn from(event: VisitEvent) -> Self {
        Event::Visit(event)
    }
}

impl From<AccessEvent> for Event {
    fn from(event: AccessEvent) -> Self {
        Event::Access(event)
    }
}

/// One broadcast sender per topic. Clones share the channels, so the
/// kiosk and every handle publish into and subscribe from the same bus.
#[derive(Clone)]
pub struct EventBus {
    visit: broadcast::Sender<Event>,
    access: broadcast::Sender<Event>,
}

impl EventBus {
    /// Bus with room for 100 undelivered events per topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            visit: broadcast::channel(capacity).0,
            access: broadcast::channel(capacity).0,
        }
    }

    /// Send `event` on its topic. Dropped silently when nobody listens.
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if self.sender(topic).send(event).is_err() {
            tracing::trace!(?topic, "event dropped, no subscribers");
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// One receiver per requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Visit => &self.visit,
            Topic::Access => &self.access,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
