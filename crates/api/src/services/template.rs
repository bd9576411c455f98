use portfolio_core::error::CoreError;
use portfolio_core::types::DbId;
use portfolio_db::models::template::{CreateTemplate, Template, UpdateTemplate};
use portfolio_db::repositories::TemplateRepo;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::validate_input;

pub async fn ensure_exists(pool: &PgPool, id: DbId) -> AppResult<Template> {
    Ok(TemplateRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Template", id))?)
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<Template>> {
    Ok(TemplateRepo::list(pool).await?)
}

/// Create a template. A duplicate title surfaces as 409 via `uq_templates_title`.
pub async fn create(pool: &PgPool, input: &CreateTemplate) -> AppResult<Template> {
    validate_input(input)?;
    Ok(TemplateRepo::create(pool, input).await?)
}

pub async fn update(pool: &PgPool, id: DbId, input: &UpdateTemplate) -> AppResult<Template> {
    validate_input(input)?;
    Ok(TemplateRepo::update(pool, id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Template", id))?)
}

pub async fn delete(pool: &PgPool, id: DbId) -> AppResult<()> {
    if !TemplateRepo::delete(pool, id).await? {
        return Err(CoreError::not_found("Template", id).into());
    }
    Ok(())
}
