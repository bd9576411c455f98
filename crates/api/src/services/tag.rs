//! Tag rules and project/request associations.

use portfolio_core::error::CoreError;
use portfolio_core::types::DbId;
use portfolio_db::models::request::{ChangeKind, RequestChange};
use portfolio_db::models::tag::{CreateTag, Tag, UpdateTag};
use portfolio_db::repositories::{RequestRepo, TagRepo};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::validate_input;
use crate::services::{project, request};

pub async fn ensure_exists(pool: &PgPool, id: DbId) -> AppResult<Tag> {
    Ok(TagRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Tag", id))?)
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<Tag>> {
    Ok(TagRepo::list(pool).await?)
}

pub async fn create(pool: &PgPool, input: &CreateTag) -> AppResult<Tag> {
    validate_input(input)?;
    Ok(TagRepo::create(pool, input).await?)
}

pub async fn update(pool: &PgPool, id: DbId, input: &UpdateTag) -> AppResult<Tag> {
    validate_input(input)?;
    Ok(TagRepo::update(pool, id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Tag", id))?)
}

pub async fn delete(pool: &PgPool, id: DbId) -> AppResult<()> {
    if !TagRepo::delete(pool, id).await? {
        return Err(CoreError::not_found("Tag", id).into());
    }
    Ok(())
}

pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> AppResult<Vec<Tag>> {
    project::ensure_exists(pool, project_id).await?;
    Ok(TagRepo::list_by_project(pool, project_id).await?)
}

/// Attach a tag to a project. Attaching an already attached tag is a no-op.
pub async fn attach(pool: &PgPool, project_id: DbId, tag_id: DbId) -> AppResult<Tag> {
    project::ensure_exists(pool, project_id).await?;
    let tag = ensure_exists(pool, tag_id).await?;
    TagRepo::attach(pool, project_id, tag_id).await?;
    Ok(tag)
}

pub async fn detach(pool: &PgPool, project_id: DbId, tag_id: DbId) -> AppResult<()> {
    if !TagRepo::detach(pool, project_id, tag_id).await? {
        return Err(CoreError::not_found("ProjectTag", tag_id).into());
    }
    Ok(())
}

/// Record a proposed tag addition or removal on a request.
///
/// Returns the request's project id with the stored delta.
pub async fn propose(
    pool: &PgPool,
    request_id: DbId,
    tag_id: DbId,
    is_remove: bool,
) -> AppResult<(DbId, RequestChange)> {
    let req = request::ensure_exists(pool, request_id).await?;
    ensure_exists(pool, tag_id).await?;
    let change = RequestRepo::add_change(pool, request_id, ChangeKind::Tag, tag_id, is_remove).await?;
    Ok((req.project_id, change))
}
