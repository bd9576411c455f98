//! HTTP-level tests for media upload, download and listing.
//!
//! Requires a Postgres `DATABASE_URL`.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_bytes, body_json, delete, get, multipart_upload, post_json, put_json, send, TestApp};
use serde_json::json;
use sqlx::PgPool;

async fn create_project(app: &TestApp) -> String {
    let created = body_json(
        post_json(
            app.router(),
            "/api/v1/project",
            json!({"title": "Media", "description": "project"}),
        )
        .await,
    )
    .await;
    created["data"]["id"].as_str().unwrap().to_string()
}

async fn upload(app: &TestApp, project_id: &str, file_name: &str, data: &[u8]) -> serde_json::Value {
    let request = multipart_upload(
        Method::POST,
        &format!("/api/v1/media/project/{project_id}"),
        file_name,
        None,
        data,
    );
    let response = send(app.router(), request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_then_download_returns_same_bytes(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = create_project(&app).await;

    let media = upload(&app, &project_id, "paper.pdf", b"%PDF-1.7 body").await;
    assert_eq!(media["name"], "paper.pdf");
    assert_eq!(media["path"], format!("{project_id}/paper.pdf"));
    let media_id = media["id"].as_str().unwrap();

    let response = get(app.router(), &format!("/api/v1/media/{media_id}/content")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"%PDF-1.7 body");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn documents_and_images_are_listed_separately(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = create_project(&app).await;

    upload(&app, &project_id, "paper.pdf", b"pdf").await;
    upload(&app, &project_id, "figure.PNG", b"png").await;

    let docs = body_json(get(app.router(), &format!("/api/v1/media/project/{project_id}")).await).await;
    let docs = docs["data"].as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["name"], "paper.pdf");

    let images = body_json(
        get(app.router(), &format!("/api/v1/media/project/{project_id}/images")).await,
    )
    .await;
    let images = images["data"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["name"], "figure.PNG");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_path_is_forbidden(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = create_project(&app).await;
    upload(&app, &project_id, "notes.txt", b"one").await;

    let request = multipart_upload(
        Method::POST,
        &format!("/api/v1/media/project/{project_id}"),
        "notes.txt",
        None,
        b"two",
    );
    let response = send(app.router(), request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn traversal_file_name_is_forbidden(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = create_project(&app).await;

    let request = multipart_upload(
        Method::POST,
        &format!("/api/v1/media/project/{project_id}"),
        "../escape.txt",
        None,
        b"x",
    );
    let response = send(app.router(), request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rename_replace_and_delete(pool: PgPool) {
    let app = TestApp::new(pool);
    let project_id = create_project(&app).await;
    let media = upload(&app, &project_id, "draft.txt", b"v1").await;
    let media_id = media["id"].as_str().unwrap().to_string();

    let response = put_json(
        app.router(),
        &format!("/api/v1/media/{media_id}"),
        json!({"name": "Final draft"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Final draft");

    let request = multipart_upload(
        Method::PUT,
        &format!("/api/v1/media/{media_id}/content"),
        "draft.txt",
        None,
        b"v2",
    );
    assert_eq!(send(app.router(), request).await.status(), StatusCode::OK);
    let content = get(app.router(), &format!("/api/v1/media/{media_id}/content")).await;
    assert_eq!(body_bytes(content).await, b"v2");

    let response = delete(app.router(), &format!("/api/v1/media/{media_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(app.router(), &format!("/api/v1/media/{media_id}/content")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
