use portfolio_core::error::CoreError;
use portfolio_core::types::DbId;
use portfolio_db::models::link::{CreateLink, Link, UpdateLink};
use portfolio_db::models::request::{ChangeKind, RequestChange};
use portfolio_db::repositories::{LinkRepo, RequestRepo};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::validate_input;
use crate::services::{project, request};

pub async fn ensure_exists(pool: &PgPool, id: DbId) -> AppResult<Link> {
    Ok(LinkRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Link", id))?)
}

pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> AppResult<Vec<Link>> {
    project::ensure_exists(pool, project_id).await?;
    Ok(LinkRepo::list_by_project(pool, project_id).await?)
}

pub async fn create(pool: &PgPool, project_id: DbId, input: &CreateLink) -> AppResult<Link> {
    validate_input(input)?;
    project::ensure_exists(pool, project_id).await?;
    Ok(LinkRepo::create(pool, project_id, input).await?)
}

pub async fn update(pool: &PgPool, id: DbId, input: &UpdateLink) -> AppResult<Link> {
    validate_input(input)?;
    Ok(LinkRepo::update(pool, id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Link", id))?)
}

/// Delete a link, returning it so the caller knows its project.
pub async fn delete(pool: &PgPool, id: DbId) -> AppResult<Link> {
    let link = ensure_exists(pool, id).await?;
    if !LinkRepo::delete(pool, id).await? {
        return Err(CoreError::not_found("Link", id).into());
    }
    Ok(link)
}

/// Add a pending link proposed by a request.
pub async fn propose_addition(pool: &PgPool, request_id: DbId, input: &CreateLink) -> AppResult<Link> {
    validate_input(input)?;
    let req = request::ensure_exists(pool, request_id).await?;
    Ok(RequestRepo::add_pending_link(pool, request_id, req.project_id, input).await?)
}

/// Propose removing an existing link of the request's project.
pub async fn propose_removal(
    pool: &PgPool,
    request_id: DbId,
    link_id: DbId,
) -> AppResult<(DbId, RequestChange)> {
    let req = request::ensure_exists(pool, request_id).await?;
    let link = ensure_exists(pool, link_id).await?;
    if link.project_id != req.project_id {
        return Err(CoreError::Validation(format!(
            "Link {link_id} does not belong to project {}",
            req.project_id
        ))
        .into());
    }
    if link.pending {
        return Err(CoreError::Validation(format!(
            "Link {link_id} is itself a pending proposal"
        ))
        .into());
    }
    let change = RequestRepo::add_change(pool, request_id, ChangeKind::Link, link_id, true).await?;
    Ok((req.project_id, change))
}
