//! Handlers for the `/link` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_core::types::DbId;
use portfolio_db::models::link::{CreateLink, UpdateLink};
use portfolio_events::{ChangeEvent, Topic};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::services::link;
use crate::state::AppState;

/// GET /api/v1/link/project/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let links = link::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: links }))
}

/// POST /api/v1/link/project/{project_id}
pub async fn create(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateLink>,
) -> AppResult<impl IntoResponse> {
    let created = link::create(&state.pool, project_id, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Link, "add", project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/link/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateLink>,
) -> AppResult<impl IntoResponse> {
    let updated = link::update(&state.pool, id, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Link, "edit", updated.project_id));
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/link/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = link::delete(&state.pool, id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Link, "delete", deleted.project_id));
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/link/request/{request_id}/add
pub async fn propose_addition(
    State(state): State<AppState>,
    AppPath(request_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateLink>,
) -> AppResult<impl IntoResponse> {
    let created = link::propose_addition(&state.pool, request_id, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Request, "edit", created.project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/link/request/{request_id}/remove/{link_id}
pub async fn propose_removal(
    State(state): State<AppState>,
    AppPath((request_id, link_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let (project_id, change) = link::propose_removal(&state.pool, request_id, link_id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Request, "edit", project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: change })))
}
