//! Handlers for the `/template` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_core::types::DbId;
use portfolio_db::models::template::{CreateTemplate, UpdateTemplate};
use portfolio_events::{ChangeEvent, Topic};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::services::template;
use crate::state::AppState;

/// GET /api/v1/template
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let templates = template::list(&state.pool).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// POST /api/v1/template
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTemplate>,
) -> AppResult<impl IntoResponse> {
    let created = template::create(&state.pool, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Template, "add", created.id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/template/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = template::ensure_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: found }))
}

/// PUT /api/v1/template/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTemplate>,
) -> AppResult<impl IntoResponse> {
    let updated = template::update(&state.pool, id, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Template, "edit", id));
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/template/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    template::delete(&state.pool, id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Template, "delete", id));
    Ok(StatusCode::NO_CONTENT)
}
