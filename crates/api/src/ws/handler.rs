use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use portfolio_events::Topic;

use crate::extract::AppPath;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// GET /api/v1/ws/{topic}
///
/// Upgrades the connection to WebSocket and subscribes it to `topic`.
/// Unknown topics are rejected with 400 before the upgrade.
pub async fn ws_handler(
    AppPath(topic): AppPath<Topic>,
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, topic, state.ws_manager))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Clients only listen; inbound frames other than Close are ignored.
async fn handle_socket(socket: WebSocket, topic: Topic, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, topic = %topic, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone(), topic).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let is_close = matches!(msg, Message::Close(_));
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
            if is_close {
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, topic = %topic, "WebSocket disconnected");
}
