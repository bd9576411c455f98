use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::ws::manager::WsManager;

/// Seconds between Ping rounds.
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Ping every subscriber on a fixed interval until the task is aborted.
///
/// Rounds with no open connections are skipped.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let open = ws_manager.connection_count().await;
            if open == 0 {
                continue;
            }
            tracing::trace!(open, "Pinging WebSocket subscribers");
            ws_manager.ping_all().await;
        }
    })
}
