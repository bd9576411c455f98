//! Portfolio change-notification bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ChangeEvent`]: a notification string addressed to a [`Topic`].

pub mod bus;
pub mod topic;

pub use bus::{ChangeEvent, EventBus};
pub use topic::Topic;
