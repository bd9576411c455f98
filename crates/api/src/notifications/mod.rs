//! Delivery of change notifications to WebSocket subscribers.
//!
//! The [`NotificationRouter`] subscribes to the event bus and forwards each
//! event to the connections listening on its topic.

pub mod router;

pub use router::NotificationRouter;
