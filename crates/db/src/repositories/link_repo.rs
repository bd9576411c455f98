//! Repository for the `links` table.

use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::link::{CreateLink, Link, UpdateLink};

pub(crate) const COLUMNS: &str = "id, project_id, name, url, pending, created_at, updated_at";

/// Provides CRUD operations for project links.
pub struct LinkRepo;

impl LinkRepo {
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateLink,
    ) -> Result<Link, sqlx::Error> {
        let query = format!(
            "INSERT INTO links (project_id, name, url) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Link>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM links WHERE id = $1");
        sqlx::query_as::<_, Link>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Links that belong to a project. Pending proposals are excluded.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Link>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM links
             WHERE project_id = $1 AND NOT pending
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a link. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLink,
    ) -> Result<Option<Link>, sqlx::Error> {
        let query = format!(
            "UPDATE links SET
                name = COALESCE($2, name),
                url = COALESCE($3, url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
