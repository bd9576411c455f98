//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`ChangeEvent`]s. It is
//! shared via `Arc<EventBus>` across the application; the API's
//! notification router is its main subscriber.

use std::fmt::Display;

use serde::Serialize;
use tokio::sync::broadcast;

use crate::topic::Topic;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// A change notification: a short message string on a topic.
///
/// Messages are either `"<event> <id>"` (entity-style) or
/// `"<project_id> <event> <username>"` (membership-style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub topic: Topic,
    pub message: String,
}

impl ChangeEvent {
    /// Entity-style event, e.g. `ChangeEvent::new(Topic::Project, "add", id)`.
    pub fn new(topic: Topic, event: &str, id: impl Display) -> Self {
        Self {
            topic,
            message: format!("{event} {id}"),
        }
    }

    /// Membership event on [`Topic::AccountProject`].
    pub fn membership(project_id: impl Display, event: &str, username: &str) -> Self {
        Self {
            topic: Topic::AccountProject,
            message: format!("{project_id} {event} {username}"),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use portfolio_events::{ChangeEvent, EventBus, Topic};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ChangeEvent::new(Topic::Tag, "add", 7));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: ChangeEvent) {
        tracing::trace!(topic = %event.topic, message = %event.message, "Publishing change event");
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(ChangeEvent::new(Topic::Project, "edit", 42));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.topic, Topic::Project);
        assert_eq!(received.message, "edit 42");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(ChangeEvent::new(Topic::Account, "delete", "alice"));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.message, "delete alice");
        assert_eq!(e1, e2);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(ChangeEvent::new(Topic::Media, "add", "orphan"));
    }

    #[test]
    fn membership_message_format() {
        let event = ChangeEvent::membership("p-1", "update", "bob");
        assert_eq!(event.topic, Topic::AccountProject);
        assert_eq!(event.message, "p-1 update bob");
    }
}
