//! Tests for the bus → WebSocket notification router.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use portfolio_api::notifications::NotificationRouter;
use portfolio_api::ws::WsManager;
use portfolio_events::{ChangeEvent, EventBus, Topic};

fn text_of(message: Message) -> String {
    match message {
        Message::Text(text) => text.as_str().to_string(),
        other => panic!("expected text frame, got {other:?}"),
    }
}

#[tokio::test]
async fn deliver_sends_message_text_to_topic_subscribers() {
    let manager = Arc::new(WsManager::new());
    let mut subscriber = manager.add("s".to_string(), Topic::AccountProject).await;
    let router = NotificationRouter::new(Arc::clone(&manager));

    let delivered = router
        .deliver(ChangeEvent::membership("p1", "add", "alice"))
        .await;

    assert_eq!(delivered, 1);
    assert_eq!(text_of(subscriber.recv().await.unwrap()), "p1 add alice");
}

#[tokio::test]
async fn deliver_without_subscribers_is_zero() {
    let manager = Arc::new(WsManager::new());
    let router = NotificationRouter::new(manager);

    let delivered = router
        .deliver(ChangeEvent::new(Topic::Template, "delete", 3))
        .await;

    assert_eq!(delivered, 0);
}

#[tokio::test]
async fn run_forwards_bus_events_and_stops_when_bus_drops() {
    let manager = Arc::new(WsManager::new());
    let mut projects = manager.add("p".to_string(), Topic::Project).await;
    let mut tags = manager.add("t".to_string(), Topic::Tag).await;

    let bus = EventBus::default();
    let handle = tokio::spawn(NotificationRouter::new(Arc::clone(&manager)).run(bus.subscribe()));

    bus.publish(ChangeEvent::new(Topic::Project, "add", 7));
    bus.publish(ChangeEvent::new(Topic::Tag, "attach", 7));

    let project_msg = tokio::time::timeout(Duration::from_secs(2), projects.recv())
        .await
        .unwrap()
        .unwrap();
    let tag_msg = tokio::time::timeout(Duration::from_secs(2), tags.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(text_of(project_msg), "add 7");
    assert_eq!(text_of(tag_msg), "attach 7");

    drop(bus);
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("router should stop once the bus is dropped")
        .unwrap();
}
