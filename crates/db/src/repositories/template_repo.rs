//! Repository for the `templates` table.

use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::{CreateTemplate, Template, UpdateTemplate};

const COLUMNS: &str =
    "id, title, standard_description, number_of_collaborators, created_at, updated_at";

/// Provides CRUD operations for project templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a template. Duplicate titles violate `uq_templates_title`.
    pub async fn create(pool: &PgPool, input: &CreateTemplate) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates (title, standard_description, number_of_collaborators)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&input.title)
            .bind(&input.standard_description)
            .bind(input.number_of_collaborators)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates ORDER BY title");
        sqlx::query_as::<_, Template>(&query).fetch_all(pool).await
    }

    /// Update a template. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE templates SET
                title = COALESCE($2, title),
                standard_description = COALESCE($3, standard_description),
                number_of_collaborators = COALESCE($4, number_of_collaborators)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.standard_description)
            .bind(input.number_of_collaborators)
            .fetch_optional(pool)
            .await
    }

    /// Delete a template. Projects using it fall back to no template.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
