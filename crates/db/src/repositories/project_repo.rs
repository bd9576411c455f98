//! Repository for the `projects` table.

use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, title, description, bibtex, archived, template_id, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, bibtex, archived)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.bibtex)
            .bind(input.archived)
            .fetch_one(pool)
            .await
    }

    /// Insert a new project and record `username` as a member with `role`,
    /// in one transaction.
    pub async fn create_with_owner(
        pool: &PgPool,
        input: &CreateProject,
        username: &str,
        role: &str,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (title, description, bibtex, archived)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.bibtex)
            .bind(input.archived)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO projects_to_accounts (project_id, username, role) VALUES ($1, $2, $3)",
        )
        .bind(project.id)
        .bind(username)
        .bind(role)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the first project with exactly this title and description.
    pub async fn find_by_title_and_description(
        pool: &PgPool,
        title: &str,
        description: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE title = $1 AND description = $2
             ORDER BY created_at LIMIT 1"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(title)
            .bind(description)
            .fetch_optional(pool)
            .await
    }

    /// List all projects in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at, id");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Replace the mutable fields of a project.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = $2,
                description = $3,
                bibtex = $4,
                archived = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.bibtex)
            .bind(input.archived)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the template of a project.
    pub async fn set_template(
        pool: &PgPool,
        id: DbId,
        template_id: Option<DbId>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET template_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(template_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Media, links, join rows and requests cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
