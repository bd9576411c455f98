//! Request validation that is rejected before any database access.
//!
//! The pool here never connects, so every case must fail in extraction or
//! input validation.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, lazy_pool, post_json, send, TestApp};
use serde_json::json;

#[tokio::test]
async fn malformed_uuid_in_path_is_bad_request() {
    let app = TestApp::new(lazy_pool());

    let response = get(app.router(), "/api/v1/project/not-a-uuid").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn null_json_body_is_bad_request() {
    let app = TestApp::new(lazy_pool());

    let response = post_json(app.router(), "/api/v1/project", serde_json::Value::Null).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn missing_content_type_is_bad_request() {
    let app = TestApp::new(lazy_pool());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/template")
        .body(Body::from(r#"{"title":"t"}"#))
        .unwrap();

    let response = send(app.router(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn request_creation_without_caller_is_unauthorized() {
    let app = TestApp::new(lazy_pool());
    let uri = format!("/api/v1/request/project/{}", uuid::Uuid::new_v4());

    let response = post_json(app.router(), &uri, json!({"new_title": "x"})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = TestApp::new(lazy_pool());

    let response = post_json(
        app.router(),
        "/api/v1/account",
        json!({"username": "alice", "name": "Alice", "password": "short"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn too_short_username_is_rejected() {
    let app = TestApp::new(lazy_pool());

    let response = post_json(
        app.router(),
        "/api/v1/account",
        json!({"username": "al", "name": "Alice", "password": "long enough password"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_account_role_is_rejected() {
    let app = TestApp::new(lazy_pool());

    let response = post_json(
        app.router(),
        "/api/v1/account",
        json!({
            "username": "alice",
            "name": "Alice",
            "password": "long enough password",
            "role": "ROLE_ROOT"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_account_search_is_rejected() {
    let app = TestApp::new(lazy_pool());

    let response = get(app.router(), "/api/v1/account/search?name=%20").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_ws_topic_is_bad_request() {
    let app = TestApp::new(lazy_pool());

    let response = get(app.router(), "/api/v1/ws/nonsense").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = TestApp::new(lazy_pool());

    let response = get(app.router(), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_carries_request_id() {
    let app = TestApp::new(lazy_pool());

    let response = get(app.router(), "/api/v1/project/not-a-uuid").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_preflight_allows_username_header() {
    let app = TestApp::new(lazy_pool());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/project")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "x-username")
        .body(Body::empty())
        .unwrap();

    let response = send(app.router(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
    let allowed = response.headers()["access-control-allow-headers"]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("x-username"));
}
