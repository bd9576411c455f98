//! HTTP-level integration tests for projects, templates and memberships.
//!
//! Uses `tower::ServiceExt` to send requests directly to the router.
//! Requires a Postgres `DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, post_json_as, put_json, TestApp};
use portfolio_events::{ChangeEvent, Topic};
use serde_json::json;
use sqlx::PgPool;

async fn create_account(app: &TestApp, username: &str) {
    let response = post_json(
        app.router(),
        "/api/v1/account",
        json!({"username": username, "name": "Test User", "password": "correct horse battery"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Project CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_list_delete_round_trip(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = post_json(
        app.router(),
        "/api/v1/project",
        json!({"title": "t", "description": "d", "archived": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let list = body_json(get(app.router(), "/api/v1/project").await).await;
    let data = list["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "t");
    assert_eq!(data[0]["description"], "d");
    assert_eq!(data[0]["archived"], false);

    let response = delete(app.router(), &format!("/api/v1/project/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let list = body_json(get(app.router(), "/api/v1/project").await).await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_title_and_description_conflicts(pool: PgPool) {
    let app = TestApp::new(pool);
    let body = json!({"title": "Same", "description": "Same desc"});

    let first = post_json(app.router(), "/api/v1/project", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app.router(), "/api/v1/project", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_project_is_not_found(pool: PgPool) {
    let app = TestApp::new(pool);
    let uri = format!("/api/v1/project/{}", uuid::Uuid::new_v4());

    let response = get(app.router(), &uri).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_fields_and_publishes_edit(pool: PgPool) {
    let app = TestApp::new(pool);
    let mut events = app.state.event_bus.subscribe();

    let created = body_json(
        post_json(
            app.router(),
            "/api/v1/project",
            json!({"title": "Old", "description": "Old desc"}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = put_json(
        app.router(),
        &format!("/api/v1/project/{id}"),
        json!({"title": "New", "description": "New desc", "bibtex": "@misc{x}", "archived": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "New");
    assert_eq!(json["data"]["archived"], true);

    assert_eq!(
        events.recv().await.unwrap(),
        ChangeEvent {
            topic: Topic::Project,
            message: format!("add {id}"),
        }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        ChangeEvent {
            topic: Topic::Project,
            message: format!("edit {id}"),
        }
    );
}

// ---------------------------------------------------------------------------
// Ownership and membership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn creator_becomes_pm_and_outsider_is_forbidden(pool: PgPool) {
    let app = TestApp::new(pool);
    create_account(&app, "alice").await;
    create_account(&app, "bob").await;

    let created = body_json(
        post_json_as(
            app.router(),
            "/api/v1/project",
            "alice",
            json!({"title": "Owned", "description": "by alice"}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = get(app.router(), &format!("/api/v1/project/{id}/members/alice")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], "PM");

    let response = get(app.router(), &format!("/api/v1/project/{id}/members/bob")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let members = body_json(get(app.router(), &format!("/api/v1/project/{id}/accounts")).await).await;
    let members = members["data"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["username"], "alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_owner_is_not_found(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = post_json_as(
        app.router(),
        "/api/v1/project",
        "ghost",
        json!({"title": "t", "description": "d"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn template_can_be_set_and_removed(pool: PgPool) {
    let app = TestApp::new(pool);

    let project = body_json(
        post_json(
            app.router(),
            "/api/v1/project",
            json!({"title": "P", "description": "D"}),
        )
        .await,
    )
    .await;
    let project_id = project["data"]["id"].as_str().unwrap().to_string();

    let template_uri = format!("/api/v1/project/{project_id}/template");
    let none = body_json(get(app.router(), &template_uri).await).await;
    assert!(none["data"].is_null());

    let template = body_json(
        post_json(
            app.router(),
            "/api/v1/template",
            json!({"title": "Thesis", "number_of_collaborators": 2}),
        )
        .await,
    )
    .await;
    let template_id = template["data"]["id"].as_str().unwrap().to_string();

    let response = put_json(
        app.router(),
        &format!("/api/v1/project/{project_id}/template/{template_id}"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let current = body_json(get(app.router(), &template_uri).await).await;
    assert_eq!(current["data"]["title"], "Thesis");

    let response = delete(app.router(), &template_uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = body_json(get(app.router(), &template_uri).await).await;
    assert!(cleared["data"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_template_title_conflicts(pool: PgPool) {
    let app = TestApp::new(pool);

    let first = post_json(app.router(), "/api/v1/template", json!({"title": "Poster"})).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app.router(), "/api/v1/template", json!({"title": "Poster"})).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_reports_database(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = get(app.router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}
