//! Handlers for the `/media` resource.
//!
//! Uploads are multipart forms with a required `file` field and an optional
//! `name` field (display name, defaults to the file name).

use axum::extract::{Multipart, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_core::types::DbId;
use portfolio_db::models::media::UpdateMedia;
use portfolio_events::{ChangeEvent, Topic};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::services::media::{self, MediaUpload};
use crate::state::AppState;

/// GET /api/v1/media/project/{project_id}
///
/// Non-image media of the project.
pub async fn list_documents(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let documents = media::list_documents(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: documents }))
}

/// GET /api/v1/media/project/{project_id}/images
pub async fn list_images(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let images = media::list_images(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/media/project/{project_id}
pub async fn upload(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let upload = read_upload(multipart).await?;
    let created = media::upload(&state.pool, state.file_store.as_ref(), project_id, upload).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Media, "add", project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/media/{id}/content
///
/// The stored bytes, as `application/octet-stream`.
pub async fn get_content(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let (_, bytes) = media::content(&state.pool, state.file_store.as_ref(), id).await?;
    Ok(([(CONTENT_TYPE, "application/octet-stream")], bytes))
}

/// PUT /api/v1/media/{id}
pub async fn rename(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateMedia>,
) -> AppResult<impl IntoResponse> {
    let updated = media::rename(&state.pool, id, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Media, "edit", updated.project_id));
    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/v1/media/{id}/content
pub async fn replace_content(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let upload = read_upload(multipart).await?;
    let updated =
        media::replace_content(&state.pool, state.file_store.as_ref(), id, &upload.data).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Media, "edit", updated.project_id));
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/media/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = media::delete(&state.pool, state.file_store.as_ref(), id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Media, "delete", deleted.project_id));
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/media/request/{request_id}
pub async fn request_entries(
    State(state): State<AppState>,
    AppPath(request_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let entries = media::request_entries(&state.pool, request_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/media/request/{request_id}/add
pub async fn propose_addition(
    State(state): State<AppState>,
    AppPath(request_id): AppPath<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let upload = read_upload(multipart).await?;
    let created =
        media::propose_addition(&state.pool, state.file_store.as_ref(), request_id, upload).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Request, "edit", created.project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/media/request/{request_id}/remove/{media_id}
pub async fn propose_removal(
    State(state): State<AppState>,
    AppPath((request_id, media_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let (project_id, change) = media::propose_removal(&state.pool, request_id, media_id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Request, "edit", project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: change })))
}

/// Collect the `file` and optional `name` fields of an upload form.
async fn read_upload(mut multipart: Multipart) -> AppResult<MediaUpload> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .ok_or_else(|| AppError::BadRequest("The 'file' field has no file name".into()))?
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((file_name, data.to_vec()));
            }
            "name" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                name = Some(text);
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    Ok(MediaUpload {
        file_name,
        name,
        data,
    })
}
