//! Repository for the `media` table.

use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::{Media, NewMedia};

pub(crate) const COLUMNS: &str = "id, project_id, name, path, pending, created_at, updated_at";

/// Provides CRUD operations for media metadata.
pub struct MediaRepo;

impl MediaRepo {
    /// Insert a media row. A duplicate `path` violates `uq_media_path`.
    pub async fn create(pool: &PgPool, input: &NewMedia) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media (project_id, name, path, pending)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(&input.path)
            .bind(input.pending)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn path_exists(pool: &PgPool, path: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM media WHERE path = $1)")
            .bind(path)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Media that belong to a project. Pending proposals are excluded.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Media>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media
             WHERE project_id = $1 AND NOT pending
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Storage paths of every media row of a project, pending ones included.
    pub async fn list_paths_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT path FROM media WHERE project_id = $1")
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(p,)| p).collect())
    }

    pub async fn rename(pool: &PgPool, id: DbId, name: &str) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("UPDATE media SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Bump `updated_at` after the stored content was replaced.
    pub async fn touch(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("UPDATE media SET updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a media row, returning it so the caller can remove its content.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("DELETE FROM media WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
