use std::sync::Arc;

use axum::extract::ws::Message;
use portfolio_events::ChangeEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Forwards bus events to topic subscribers as text frames.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](portfolio_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.deliver(event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Send one event to its topic's subscribers. Returns the delivery count.
    pub async fn deliver(&self, event: ChangeEvent) -> usize {
        let topic = event.topic;
        let delivered = self
            .ws_manager
            .send_to_topic(topic, Message::Text(event.message.into()))
            .await;
        tracing::debug!(topic = %topic, delivered, "Notification delivered");
        delivered
    }
}
