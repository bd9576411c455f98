//! Handlers for the `/collaborator` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_core::types::DbId;
use portfolio_db::models::collaborator::{AttachCollaborator, CollaboratorInput};
use portfolio_db::models::request::ProposeChange;
use portfolio_events::{ChangeEvent, Topic};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::services::collaborator;
use crate::state::AppState;

/// GET /api/v1/collaborator
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let collaborators = collaborator::list(&state.pool).await?;
    Ok(Json(DataResponse { data: collaborators }))
}

/// POST /api/v1/collaborator
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CollaboratorInput>,
) -> AppResult<impl IntoResponse> {
    let created = collaborator::create(&state.pool, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Collaborator, "add", created.id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/collaborator/{id}
pub async fn rename(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CollaboratorInput>,
) -> AppResult<impl IntoResponse> {
    let updated = collaborator::rename(&state.pool, id, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Collaborator, "edit", id));
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/collaborator/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    collaborator::delete(&state.pool, id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Collaborator, "delete", id));
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/collaborator/project/{project_id}
pub async fn project_collaborators(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let collaborators = collaborator::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: collaborators }))
}

/// POST /api/v1/collaborator/project/{project_id}
///
/// Attach by name, creating the collaborator on first use.
pub async fn attach(
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<AttachCollaborator>,
) -> AppResult<impl IntoResponse> {
    let attached = collaborator::attach(&state.pool, project_id, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Collaborator, "attach", project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: attached })))
}

/// DELETE /api/v1/collaborator/project/{project_id}/{collaborator_id}
pub async fn detach(
    State(state): State<AppState>,
    AppPath((project_id, collaborator_id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    collaborator::detach(&state.pool, project_id, collaborator_id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Collaborator, "detach", project_id));
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/collaborator/request/{request_id}/{collaborator_id}
///
/// Body: `{"is_remove": bool}`.
pub async fn propose(
    State(state): State<AppState>,
    AppPath((request_id, collaborator_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<ProposeChange>,
) -> AppResult<impl IntoResponse> {
    let (project_id, change) =
        collaborator::propose(&state.pool, request_id, collaborator_id, input.is_remove).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Request, "edit", project_id));
    Ok((StatusCode::CREATED, Json(DataResponse { data: change })))
}
