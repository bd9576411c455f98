//! Handlers for accounts, account-wide roles and per-project roles.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_core::types::DbId;
use portfolio_db::models::account::{
    AccountSearchParams, CreateAccount, EditAccountRole, ProjectRoleInput, UpdateAccount,
};
use portfolio_events::{ChangeEvent, Topic};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::services::account;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// GET /api/v1/account
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let summaries = account::summaries(&state.pool).await?;
    Ok(Json(DataResponse { data: summaries }))
}

/// POST /api/v1/account
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAccount>,
) -> AppResult<impl IntoResponse> {
    let created = account::create(&state.pool, &input, state.config.min_password_length).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Account, "add", &created.username));
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/account/usernames
pub async fn usernames(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let names = account::usernames(&state.pool).await?;
    Ok(Json(DataResponse { data: names }))
}

/// GET /api/v1/account/search?name=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<AccountSearchParams>,
) -> AppResult<impl IntoResponse> {
    let names = account::search(&state.pool, &params.name).await?;
    Ok(Json(DataResponse { data: names }))
}

/// GET /api/v1/account/{username}
pub async fn get_by_username(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let found = account::ensure_exists(&state.pool, &username).await?;
    Ok(Json(DataResponse { data: found }))
}

/// PUT /api/v1/account/{username}
pub async fn update(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
    AppJson(input): AppJson<UpdateAccount>,
) -> AppResult<impl IntoResponse> {
    let updated = account::update(
        &state.pool,
        &username,
        &input,
        state.config.min_password_length,
    )
    .await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Account, "edit", &username));
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/account/{username}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> AppResult<StatusCode> {
    account::delete(&state.pool, &username).await?;
    tracing::info!(username = %username, "Account deleted");
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Account, "delete", &username));
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/account/{username}/role
pub async fn set_role(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
    AppJson(input): AppJson<EditAccountRole>,
) -> AppResult<impl IntoResponse> {
    let summary = account::set_role(&state.pool, &username, &input).await?;
    state
        .event_bus
        .publish(ChangeEvent::new(Topic::Account, "edit", &username));
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/account/{username}/projects
pub async fn projects(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let projects = account::projects(&state.pool, &username).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/account/{username}/managed
pub async fn managed_projects(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let projects = account::managed_projects(&state.pool, &username).await?;
    Ok(Json(DataResponse { data: projects }))
}

// ---------------------------------------------------------------------------
// Per-project roles
// ---------------------------------------------------------------------------

/// GET /api/v1/account/{username}/projects/{project_id}/role
pub async fn get_project_role(
    State(state): State<AppState>,
    AppPath((username, project_id)): AppPath<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let role = account::project_role(&state.pool, &username, project_id).await?;
    Ok(Json(DataResponse { data: role }))
}

/// POST /api/v1/account/{username}/projects/{project_id}/role
pub async fn assign_project_role(
    State(state): State<AppState>,
    AppPath((username, project_id)): AppPath<(String, DbId)>,
    AppJson(input): AppJson<ProjectRoleInput>,
) -> AppResult<impl IntoResponse> {
    let membership =
        account::assign_project_role(&state.pool, &username, project_id, input.role).await?;
    state
        .event_bus
        .publish(ChangeEvent::membership(project_id, "add", &username));
    Ok((StatusCode::CREATED, Json(DataResponse { data: membership })))
}

/// PUT /api/v1/account/{username}/projects/{project_id}/role
pub async fn update_project_role(
    State(state): State<AppState>,
    AppPath((username, project_id)): AppPath<(String, DbId)>,
    AppJson(input): AppJson<ProjectRoleInput>,
) -> AppResult<impl IntoResponse> {
    let membership =
        account::update_project_role(&state.pool, &username, project_id, input.role).await?;
    state
        .event_bus
        .publish(ChangeEvent::membership(project_id, "update", &username));
    Ok(Json(DataResponse { data: membership }))
}

/// DELETE /api/v1/account/{username}/projects/{project_id}/role
pub async fn remove_project_role(
    State(state): State<AppState>,
    AppPath((username, project_id)): AppPath<(String, DbId)>,
) -> AppResult<StatusCode> {
    account::remove_project_role(&state.pool, &username, project_id).await?;
    state
        .event_bus
        .publish(ChangeEvent::membership(project_id, "delete", &username));
    Ok(StatusCode::NO_CONTENT)
}
