//! Handlers for tags and their project/request associations.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_core::types::DbId;
use portfolio_db::models::request::ProposeChange;
use portfolio_db::models::tag::{CreateTag, UpdateTag};
use portfolio_events::{ChangeEvent, Topic};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::services::tag;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Tag CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = tag::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tags
pub async fn create_tag(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTag>,
) -> AppResult<impl IntoResponse> {
    let created = tag::create(&state.pool, &input).await?;
    tracing::info!(tag_id = %created.id, "Tag created");
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Tag, "add", created.id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/tags/{id}
///
/// Update a tag's name and/or color.
pub async fn update_tag(
    State(state): State<AppState>,
    AppPath(tag_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTag>,
) -> AppResult<impl IntoResponse> {
    let updated = tag::update(&state.pool, tag_id, &input).await?;
    tracing::info!(tag_id = %tag_id, "Tag updated");
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Tag, "edit", tag_id));
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/tags/{id}
///
/// Delete a tag and all its project associations.
pub async fn delete_tag(
    State(state): State<AppState>,
    AppPath(tag_id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    tag::delete(&state.pool, tag_id).await?;
    tracing::info!(tag_id = %tag_id, "Tag deleted");
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Tag, "delete", tag_id));
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Project-tag associations
// ---------------------------------------------------------------------------

/// GET /api/v1/tags/project/{project_id}
pub async fn project_tags(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let tags = tag::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tags/project/{project_id}/{tag_id}
pub async fn attach_tag(
    State(state): State<AppState>,
    AppPath((project_id, tag_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let attached = tag::attach(&state.pool, project_id, tag_id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Tag, "attach", project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: attached })))
}

/// DELETE /api/v1/tags/project/{project_id}/{tag_id}
pub async fn detach_tag(
    State(state): State<AppState>,
    AppPath((project_id, tag_id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    tag::detach(&state.pool, project_id, tag_id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Tag, "detach", project_id));
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Request proposals
// ---------------------------------------------------------------------------

/// POST /api/v1/tags/request/{request_id}/{tag_id}
///
/// Body: `{"is_remove": bool}`.
pub async fn propose_tag(
    State(state): State<AppState>,
    AppPath((request_id, tag_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<ProposeChange>,
) -> AppResult<impl IntoResponse> {
    let (project_id, change) =
        tag::propose(&state.pool, request_id, tag_id, input.is_remove).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Request, "edit", project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: change })))
}
