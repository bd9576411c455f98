//! Handlers for the `/project` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_core::types::DbId;
use portfolio_db::models::project::{CreateProject, UpdateProject};
use portfolio_events::{ChangeEvent, Topic};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::services::project;
use crate::state::AppState;

/// GET /api/v1/project
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let projects = project::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/project
///
/// The caller named in `X-Username`, if any, becomes the project's PM.
pub async fn create(
    State(state): State<AppState>,
    caller: CallerIdentity,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<impl IntoResponse> {
    let created = project::create(&state.pool, &input, caller.username.as_deref()).await?;

    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Project, "add", created.id));
    if let Some(username) = caller.username.as_deref() {
        state
            .event_bus
            .publish(ChangeEvent::membership(created.id, "add", username));
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/project/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = project::ensure_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: found }))
}

/// PUT /api/v1/project/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    let updated = project::update(&state.pool, id, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Project, "edit", id));
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/project/{id}
///
/// Cascades to media (rows and stored content), links, memberships and
/// requests.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    project::delete(&state.pool, state.file_store.as_ref(), id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Project, "delete", id));
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/project/{id}/template
///
/// Returns `{"data": null}` when the project has no template.
pub async fn get_template(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = project::template_of(&state.pool, id).await?;
    Ok(Json(DataResponse { data: template }))
}

/// PUT /api/v1/project/{id}/template/{template_id}
pub async fn set_template(
    State(state): State<AppState>,
    AppPath((id, template_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let updated = project::set_template(&state.pool, id, template_id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Project, "edit", id));
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/project/{id}/template
pub async fn remove_template(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let updated = project::clear_template(&state.pool, id).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Project, "edit", id));
    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/project/{id}/members/{username}
///
/// The member's role in the project. 404 if the project is missing, 403 if
/// the account is not a member.
pub async fn member_role(
    State(state): State<AppState>,
    AppPath((id, username)): AppPath<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let role = project::user_belongs_to_project(&state.pool, id, &username).await?;
    Ok(Json(DataResponse { data: role }))
}

/// GET /api/v1/project/{id}/accounts
pub async fn accounts(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let members = project::members(&state.pool, id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/project/{id}/collaborators
pub async fn collaborators(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let collaborators = project::collaborators(&state.pool, id).await?;
    Ok(Json(DataResponse { data: collaborators }))
}
