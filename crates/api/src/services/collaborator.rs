//! Collaborator rules: find-or-create on attach and request proposals.

use portfolio_core::error::CoreError;
use portfolio_core::types::DbId;
use portfolio_db::models::collaborator::{
    AttachCollaborator, Collaborator, CollaboratorInput, ProjectCollaborator,
};
use portfolio_db::models::request::{ChangeKind, RequestChange};
use portfolio_db::repositories::{CollaboratorRepo, RequestRepo};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::validate_input;
use crate::services::{project, request};

pub async fn ensure_exists(pool: &PgPool, id: DbId) -> AppResult<Collaborator> {
    Ok(CollaboratorRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Collaborator", id))?)
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<Collaborator>> {
    Ok(CollaboratorRepo::list(pool).await?)
}

pub async fn create(pool: &PgPool, input: &CollaboratorInput) -> AppResult<Collaborator> {
    validate_input(input)?;
    Ok(CollaboratorRepo::create(pool, input.name.trim()).await?)
}

pub async fn rename(pool: &PgPool, id: DbId, input: &CollaboratorInput) -> AppResult<Collaborator> {
    validate_input(input)?;
    Ok(CollaboratorRepo::rename(pool, id, input.name.trim())
        .await?
        .ok_or_else(|| CoreError::not_found("Collaborator", id))?)
}

pub async fn delete(pool: &PgPool, id: DbId) -> AppResult<()> {
    if !CollaboratorRepo::delete(pool, id).await? {
        return Err(CoreError::not_found("Collaborator", id).into());
    }
    Ok(())
}

pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> AppResult<Vec<ProjectCollaborator>> {
    project::collaborators(pool, project_id).await
}

/// Attach a collaborator to a project by name.
///
/// Reuses an existing collaborator with exactly this name, creating one
/// otherwise. Re-attaching replaces the role text.
pub async fn attach(
    pool: &PgPool,
    project_id: DbId,
    input: &AttachCollaborator,
) -> AppResult<ProjectCollaborator> {
    validate_input(input)?;
    project::ensure_exists(pool, project_id).await?;

    let name = input.name.trim();
    let collaborator = match CollaboratorRepo::find_by_name(pool, name).await? {
        Some(existing) => existing,
        None => CollaboratorRepo::create(pool, name).await?,
    };
    CollaboratorRepo::attach(
        pool,
        project_id,
        collaborator.id,
        input.role_in_project.as_deref(),
    )
    .await?;

    tracing::info!(
        project_id = %project_id,
        collaborator_id = %collaborator.id,
        "Collaborator attached",
    );
    Ok(ProjectCollaborator {
        id: collaborator.id,
        name: collaborator.name,
        role_in_project: input.role_in_project.clone(),
    })
}

pub async fn detach(pool: &PgPool, project_id: DbId, collaborator_id: DbId) -> AppResult<()> {
    if !CollaboratorRepo::detach(pool, project_id, collaborator_id).await? {
        return Err(CoreError::not_found("ProjectCollaborator", collaborator_id).into());
    }
    Ok(())
}

/// Record a proposed collaborator addition or removal on a request.
pub async fn propose(
    pool: &PgPool,
    request_id: DbId,
    collaborator_id: DbId,
    is_remove: bool,
) -> AppResult<(DbId, RequestChange)> {
    let req = request::ensure_exists(pool, request_id).await?;
    ensure_exists(pool, collaborator_id).await?;
    let change = RequestRepo::add_change(
        pool,
        request_id,
        ChangeKind::Collaborator,
        collaborator_id,
        is_remove,
    )
    .await?;
    Ok((req.project_id, change))
}
