//! HTTP-level tests for accounts and per-project roles.
//!
//! Requires a Postgres `DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, post_json_as, put_json, TestApp};
use portfolio_events::{ChangeEvent, Topic};
use serde_json::json;
use sqlx::PgPool;

async fn create_account(app: &TestApp, username: &str, name: &str) -> StatusCode {
    post_json(
        app.router(),
        "/api/v1/account",
        json!({"username": username, "name": name, "password": "correct horse battery"}),
    )
    .await
    .status()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn password_hash_is_never_returned(pool: PgPool) {
    let app = TestApp::new(pool);
    assert_eq!(create_account(&app, "alice", "Alice Liddell").await, StatusCode::CREATED);

    let json = body_json(get(app.router(), "/api/v1/account/alice").await).await;

    assert_eq!(json["data"]["username"], "alice");
    assert_eq!(json["data"]["role"], "ROLE_USER");
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_conflicts(pool: PgPool) {
    let app = TestApp::new(pool);

    assert_eq!(create_account(&app, "alice", "Alice").await, StatusCode::CREATED);
    assert_eq!(create_account(&app, "alice", "Other").await, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_matches_name_fragment(pool: PgPool) {
    let app = TestApp::new(pool);
    create_account(&app, "alice", "Alice Liddell").await;
    create_account(&app, "bob", "Bob Builder").await;

    let json = body_json(get(app.router(), "/api/v1/account/search?name=lid").await).await;

    assert_eq!(json["data"], json!(["alice"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn role_flags_set_account_role(pool: PgPool) {
    let app = TestApp::new(pool);
    create_account(&app, "alice", "Alice").await;

    let response = put_json(
        app.router(),
        "/api/v1/account/alice/role",
        json!({"is_administrator": false, "is_pm": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_pm"], true);
    assert_eq!(json["data"]["is_administrator"], false);

    let summaries = body_json(get(app.router(), "/api/v1/account").await).await;
    assert_eq!(summaries["data"][0]["is_pm"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_role_lifecycle_publishes_membership_events(pool: PgPool) {
    let app = TestApp::new(pool);
    create_account(&app, "alice", "Alice").await;
    create_account(&app, "carol", "Carol").await;

    let project = body_json(
        post_json_as(
            app.router(),
            "/api/v1/project",
            "alice",
            json!({"title": "Shared", "description": "work"}),
        )
        .await,
    )
    .await;
    let project_id = project["data"]["id"].as_str().unwrap().to_string();
    let role_uri = format!("/api/v1/account/carol/projects/{project_id}/role");

    let mut events = app.state.event_bus.subscribe();

    let response = post_json(app.router(), &role_uri, json!({"role": "EDITOR"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let again = post_json(app.router(), &role_uri, json!({"role": "EDITOR"})).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let response = put_json(app.router(), &role_uri, json!({"role": "CONTENT_CREATOR"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let role = body_json(get(app.router(), &role_uri).await).await;
    assert_eq!(role["data"], "CONTENT_CREATOR");

    let managed = body_json(get(app.router(), "/api/v1/account/alice/managed").await).await;
    assert_eq!(managed["data"].as_array().unwrap().len(), 1);
    let managed = body_json(get(app.router(), "/api/v1/account/carol/managed").await).await;
    assert!(managed["data"].as_array().unwrap().is_empty());

    let response = delete(app.router(), &role_uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(app.router(), &role_uri).await.status(), StatusCode::FORBIDDEN);

    for expected in ["add", "update", "delete"] {
        assert_eq!(
            events.recv().await.unwrap(),
            ChangeEvent {
                topic: Topic::AccountProject,
                message: format!("{project_id} {expected} carol"),
            }
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_account_removes_memberships(pool: PgPool) {
    let app = TestApp::new(pool);
    create_account(&app, "alice", "Alice").await;
    post_json_as(
        app.router(),
        "/api/v1/project",
        "alice",
        json!({"title": "Solo", "description": "project"}),
    )
    .await;

    let response = delete(app.router(), "/api/v1/account/alice").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        get(app.router(), "/api/v1/account/alice").await.status(),
        StatusCode::NOT_FOUND
    );
    let usernames = body_json(get(app.router(), "/api/v1/account/usernames").await).await;
    assert!(usernames["data"].as_array().unwrap().is_empty());
}
