//! Change-request workflow: proposal, acceptance, rejection and
//! counter-offers.

use portfolio_core::error::CoreError;
use portfolio_core::roles::RoleInProject;
use portfolio_core::storage::FileStore;
use portfolio_core::types::DbId;
use portfolio_db::models::request::{CreateRequest, Request, RequestDetail};
use portfolio_db::repositories::{
    AccountRepo, CollaboratorRepo, LinkRepo, MediaRepo, RequestRepo, TagRepo,
};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::project;

pub async fn ensure_exists(pool: &PgPool, id: DbId) -> AppResult<Request> {
    Ok(RequestRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Request", id))?)
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<Request>> {
    Ok(RequestRepo::list(pool).await?)
}

pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> AppResult<Vec<Request>> {
    project::ensure_exists(pool, project_id).await?;
    Ok(RequestRepo::list_by_project(pool, project_id).await?)
}

pub async fn list_by_user(pool: &PgPool, username: &str) -> AppResult<Vec<Request>> {
    if !AccountRepo::exists(pool, username).await? {
        return Err(CoreError::not_found("Account", username).into());
    }
    Ok(RequestRepo::list_by_username(pool, username).await?)
}

pub async fn detail(pool: &PgPool, id: DbId) -> AppResult<RequestDetail> {
    Ok(RequestRepo::detail(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Request", id))?)
}

/// Create a change request by `username` against a project.
pub async fn create(
    pool: &PgPool,
    project_id: DbId,
    username: &str,
    input: &CreateRequest,
) -> AppResult<Request> {
    project::ensure_exists(pool, project_id).await?;
    if !AccountRepo::exists(pool, username).await? {
        return Err(CoreError::not_found("Account", username).into());
    }
    check_payload(pool, project_id, input).await?;

    let request = RequestRepo::create(pool, project_id, username, input, false).await?;
    tracing::info!(request_id = %request.id, project_id = %project_id, username, "Request created");
    Ok(request)
}

/// Apply a request to its project and delete it.
pub async fn accept(pool: &PgPool, store: &dyn FileStore, id: DbId) -> AppResult<Request> {
    let (request, removed) = RequestRepo::accept(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Request", id))?;
    project::remove_stored_files(store, &removed).await;

    tracing::info!(
        request_id = %id,
        project_id = %request.project_id,
        removed_media = removed.len(),
        "Request accepted",
    );
    Ok(request)
}

/// Delete a request together with the pending media and links it proposed.
pub async fn reject(pool: &PgPool, store: &dyn FileStore, id: DbId) -> AppResult<Request> {
    let request = ensure_exists(pool, id).await?;
    let removed = RequestRepo::reject(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Request", id))?;
    project::remove_stored_files(store, &removed).await;

    tracing::info!(request_id = %id, project_id = %request.project_id, "Request rejected");
    Ok(request)
}

/// Replace a request with a counter-offer from a project manager.
///
/// The new request keeps the original author and project and is marked
/// `is_counteroffer`. The caller must be the project's PM.
pub async fn counter_offer(
    pool: &PgPool,
    store: &dyn FileStore,
    id: DbId,
    caller: &str,
    input: &CreateRequest,
) -> AppResult<Request> {
    let original = ensure_exists(pool, id).await?;
    let role = project::user_belongs_to_project(pool, original.project_id, caller).await?;
    if role != RoleInProject::Pm {
        return Err(CoreError::Forbidden(format!(
            "Only the project manager can counter-offer; '{caller}' is {role}"
        ))
        .into());
    }
    check_payload(pool, original.project_id, input).await?;

    let (request, removed) =
        RequestRepo::counter_offer(pool, id, original.project_id, &original.username, input)
            .await?
            .ok_or_else(|| CoreError::not_found("Request", id))?;
    project::remove_stored_files(store, &removed).await;

    tracing::info!(
        replaced = %id,
        request_id = %request.id,
        project_id = %request.project_id,
        "Counter-offer created",
    );
    Ok(request)
}

/// Reject payloads whose edits blank a required field or whose deltas refer
/// to missing entities or entities of another project.
async fn check_payload(pool: &PgPool, project_id: DbId, input: &CreateRequest) -> AppResult<()> {
    input.field_edits().validate()?;

    for delta in &input.tags {
        if TagRepo::find_by_id(pool, delta.id).await?.is_none() {
            return Err(CoreError::not_found("Tag", delta.id).into());
        }
    }
    for delta in &input.collaborators {
        if CollaboratorRepo::find_by_id(pool, delta.id).await?.is_none() {
            return Err(CoreError::not_found("Collaborator", delta.id).into());
        }
    }
    for media_id in &input.removed_media {
        let media = MediaRepo::find_by_id(pool, *media_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Media", media_id))?;
        if media.project_id != project_id {
            return Err(CoreError::Validation(format!(
                "Media {media_id} does not belong to project {project_id}"
            ))
            .into());
        }
        if media.pending {
            return Err(CoreError::Validation(format!(
                "Media {media_id} is itself a pending proposal"
            ))
            .into());
        }
    }
    for link_id in &input.removed_links {
        let link = LinkRepo::find_by_id(pool, *link_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Link", link_id))?;
        if link.project_id != project_id {
            return Err(CoreError::Validation(format!(
                "Link {link_id} does not belong to project {project_id}"
            ))
            .into());
        }
        if link.pending {
            return Err(CoreError::Validation(format!(
                "Link {link_id} is itself a pending proposal"
            ))
            .into());
        }
    }
    Ok(())
}
