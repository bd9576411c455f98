//! Handlers for change requests.
//!
//! Creating a request and counter-offering require the `X-Username` header.
//! Accepting applies the request to its project; deleting rejects it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_core::types::DbId;
use portfolio_db::models::request::CreateRequest;
use portfolio_events::{ChangeEvent, Topic};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::identity::RequireCaller;
use crate::response::DataResponse;
use crate::services::request;
use crate::state::AppState;

/// GET /api/v1/request
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let requests = request::list(&state.pool).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/request/project/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let requests = request::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/request/user/{username}
pub async fn list_by_user(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let requests = request::list_by_user(&state.pool, &username).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/request/{id}
///
/// The request with its tag, media, link and collaborator deltas.
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = request::detail(&state.pool, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/request/project/{project_id}
pub async fn create(
    State(state): State<AppState>,
    RequireCaller(username): RequireCaller,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateRequest>,
) -> AppResult<impl IntoResponse> {
    let created = request::create(&state.pool, project_id, &username, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Request, "add", project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/request/{id}/accept
pub async fn accept(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let accepted = request::accept(&state.pool, state.file_store.as_ref(), id).await?;
    let project_id = accepted.project_id;

    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Request, "accept", project_id));
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Project, "edit", project_id));

    Ok(Json(DataResponse { data: accepted }))
}

/// POST /api/v1/request/{id}/counter-offer
pub async fn counter_offer(
    State(state): State<AppState>,
    RequireCaller(username): RequireCaller,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateRequest>,
) -> AppResult<impl IntoResponse> {
    let created =
        request::counter_offer(&state.pool, state.file_store.as_ref(), id, &username, &input)
            .await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Request, "counter", created.project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// DELETE /api/v1/request/{id}
pub async fn reject(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let rejected = request::reject(&state.pool, state.file_store.as_ref(), id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Request, "reject", rejected.project_id));
    Ok(StatusCode::NO_CONTENT)
}
