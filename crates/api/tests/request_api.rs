//! HTTP-level tests for the change-request workflow: create, propose,
//! accept, reject and counter-offer.
//!
//! Requires a Postgres `DATABASE_URL`.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, delete, get, multipart_upload, post_empty, post_json, post_json_as, send, TestApp,
};
use portfolio_events::Topic;
use serde_json::json;
use sqlx::PgPool;

/// Accounts `alice` (project PM) and `bob` (author), plus alice's project.
async fn seed(app: &TestApp) -> String {
    for username in ["alice", "bob"] {
        let response = post_json(
            app.router(),
            "/api/v1/account",
            json!({"username": username, "name": username, "password": "correct horse battery"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let project = body_json(
        post_json_as(
            app.router(),
            "/api/v1/project",
            "alice",
            json!({"title": "Original", "description": "Original description"}),
        )
        .await,
    )
    .await;
    project["data"]["id"].as_str().unwrap().to_string()
}

async fn create_request(app: &TestApp, project_id: &str, body: serde_json::Value) -> String {
    let response = post_json_as(
        app.router(),
        &format!("/api/v1/request/project/{project_id}"),
        "bob",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn accept_applies_fields_and_tags_then_removes_request(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = seed(&app).await;

    let tag = body_json(post_json(app.router(), "/api/v1/tags", json!({"name": "ml"})).await).await;
    let tag_id = tag["data"]["id"].as_str().unwrap().to_string();

    let request_id = create_request(
        &app,
        &project_id,
        json!({"new_title": "Renamed", "tags": [{"id": tag_id, "is_remove": false}]}),
    )
    .await;

    let detail = body_json(get(app.router(), &format!("/api/v1/request/{request_id}")).await).await;
    assert_eq!(detail["data"]["new_title"], "Renamed");
    assert_eq!(detail["data"]["tags"].as_array().unwrap().len(), 1);

    let response = post_empty(app.router(), &format!("/api/v1/request/{request_id}/accept")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let project = body_json(get(app.router(), &format!("/api/v1/project/{project_id}")).await).await;
    assert_eq!(project["data"]["title"], "Renamed");
    assert_eq!(project["data"]["description"], "Original description");

    let tags = body_json(get(app.router(), &format!("/api/v1/tags/project/{project_id}")).await).await;
    assert_eq!(tags["data"][0]["name"], "ml");

    let response = get(app.router(), &format!("/api/v1/request/{request_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn proposed_media_stays_pending_until_accepted(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = seed(&app).await;
    let request_id = create_request(&app, &project_id, json!({})).await;

    let upload = multipart_upload(
        Method::POST,
        &format!("/api/v1/media/request/{request_id}/add"),
        "slides.pdf",
        Some("Slides"),
        b"slides",
    );
    let response = send(app.router(), upload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["pending"], true);

    let docs_uri = format!("/api/v1/media/project/{project_id}");
    let docs = body_json(get(app.router(), &docs_uri).await).await;
    assert!(docs["data"].as_array().unwrap().is_empty());

    let entries = body_json(get(app.router(), &format!("/api/v1/media/request/{request_id}")).await).await;
    assert_eq!(entries["data"][0]["name"], "Slides");
    assert_eq!(entries["data"][0]["is_remove"], false);

    post_empty(app.router(), &format!("/api/v1/request/{request_id}/accept")).await;

    let docs = body_json(get(app.router(), &docs_uri).await).await;
    let docs = docs["data"].as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["pending"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reject_discards_request_and_pending_media(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = seed(&app).await;
    let request_id = create_request(&app, &project_id, json!({"new_bibtex": "@misc{x}"})).await;

    let upload = multipart_upload(
        Method::POST,
        &format!("/api/v1/media/request/{request_id}/add"),
        "draft.pdf",
        None,
        b"draft",
    );
    let media = body_json(send(app.router(), upload).await).await;
    let media_id = media["data"]["id"].as_str().unwrap().to_string();

    let mut events = app.state.event_bus.subscribe();
    let response = delete(app.router(), &format!("/api/v1/request/{request_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let event = events.recv().await.unwrap();
    assert_eq!(event.topic, Topic::Request);
    assert_eq!(event.message, format!("reject {project_id}"));

    let response = get(app.router(), &format!("/api/v1/media/{media_id}/content")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let project = body_json(get(app.router(), &format!("/api/v1/project/{project_id}")).await).await;
    assert!(project["data"]["bibtex"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_media_cannot_be_proposed_for_removal(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = seed(&app).await;
    let request_id = create_request(&app, &project_id, json!({})).await;

    let upload = multipart_upload(
        Method::POST,
        &format!("/api/v1/media/request/{request_id}/add"),
        "draft.pdf",
        None,
        b"draft",
    );
    let media = body_json(send(app.router(), upload).await).await;
    let media_id = media["data"]["id"].as_str().unwrap().to_string();

    let response = post_empty(
        app.router(),
        &format!("/api/v1/media/request/{request_id}/remove/{media_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = delete(app.router(), &format!("/api/v1/request/{request_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.router(), &format!("/api/v1/media/{media_id}/content")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The file name is free again once the proposal is gone.
    let upload = multipart_upload(
        Method::POST,
        &format!("/api/v1/media/project/{project_id}"),
        "draft.pdf",
        None,
        b"final",
    );
    assert_eq!(send(app.router(), upload).await.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn accepting_a_rejected_request_is_not_found(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = seed(&app).await;
    let request_id = create_request(&app, &project_id, json!({"new_title": "Hijacked"})).await;

    let response = delete(app.router(), &format!("/api/v1/request/{request_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_empty(app.router(), &format!("/api/v1/request/{request_id}/accept")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let project = body_json(get(app.router(), &format!("/api/v1/project/{project_id}")).await).await;
    assert_eq!(project["data"]["title"], "Original");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_the_pm_can_counter_offer(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = seed(&app).await;
    let request_id = create_request(&app, &project_id, json!({"new_title": "Bob's title"})).await;
    let uri = format!("/api/v1/request/{request_id}/counter-offer");

    let response = post_json_as(app.router(), &uri, "bob", json!({"new_title": "x"})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_as(
        app.router(),
        &uri,
        "alice",
        json!({"new_title": "Alice's compromise"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let counter = body_json(response).await;
    assert_eq!(counter["data"]["is_counteroffer"], true);
    assert_eq!(counter["data"]["username"], "bob");

    let response = get(app.router(), &format!("/api/v1/request/{request_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let by_user = body_json(get(app.router(), "/api/v1/request/user/bob").await).await;
    let by_user = by_user["data"].as_array().unwrap();
    assert_eq!(by_user.len(), 1);
    assert_eq!(by_user[0]["new_title"], "Alice's compromise");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_proposed_title_is_rejected(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = seed(&app).await;

    let response = post_json_as(
        app.router(),
        &format!("/api/v1/request/project/{project_id}"),
        "bob",
        json!({"new_title": "   "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
