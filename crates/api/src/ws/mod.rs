//! WebSocket infrastructure for change notifications.
//!
//! Each connection subscribes to exactly one [`Topic`](portfolio_events::Topic)
//! via `/ws/{topic}` and receives that topic's messages as text frames.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
