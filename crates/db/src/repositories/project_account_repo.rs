//! Repository for the `projects_to_accounts` join table.

use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{AccountProject, Project, ProjectAccount, ProjectMember};

const COLUMNS: &str = "id, project_id, username, role, created_at, updated_at";

/// Per-project role assignments of accounts.
pub struct ProjectAccountRepo;

impl ProjectAccountRepo {
    /// The role `username` holds in `project_id`, if any.
    pub async fn find_role(
        pool: &PgPool,
        project_id: DbId,
        username: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT role FROM projects_to_accounts WHERE project_id = $1 AND username = $2",
        )
        .bind(project_id)
        .bind(username)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(role,)| role))
    }

    /// Add `username` to a project. A second assignment violates
    /// `uq_projects_to_accounts`.
    pub async fn assign(
        pool: &PgPool,
        project_id: DbId,
        username: &str,
        role: &str,
    ) -> Result<ProjectAccount, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects_to_accounts (project_id, username, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectAccount>(&query)
            .bind(project_id)
            .bind(username)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Change an existing assignment. Returns `None` if there is none.
    pub async fn update_role(
        pool: &PgPool,
        project_id: DbId,
        username: &str,
        role: &str,
    ) -> Result<Option<ProjectAccount>, sqlx::Error> {
        let query = format!(
            "UPDATE projects_to_accounts SET role = $3
             WHERE project_id = $1 AND username = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectAccount>(&query)
            .bind(project_id)
            .bind(username)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Remove `username` from a project. Returns `true` if a row was removed.
    pub async fn remove(pool: &PgPool, project_id: DbId, username: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM projects_to_accounts WHERE project_id = $1 AND username = $2")
                .bind(project_id)
                .bind(username)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Accounts that belong to a project.
    pub async fn list_members(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMember>, sqlx::Error> {
        sqlx::query_as::<_, ProjectMember>(
            "SELECT a.username, a.name, pa.role
             FROM projects_to_accounts pa
             JOIN accounts a ON a.username = pa.username
             WHERE pa.project_id = $1
             ORDER BY a.username",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Projects an account belongs to, with its role in each.
    pub async fn list_projects_for_account(
        pool: &PgPool,
        username: &str,
    ) -> Result<Vec<AccountProject>, sqlx::Error> {
        sqlx::query_as::<_, AccountProject>(
            "SELECT p.id AS project_id, p.title, pa.role
             FROM projects_to_accounts pa
             JOIN projects p ON p.id = pa.project_id
             WHERE pa.username = $1
             ORDER BY p.created_at",
        )
        .bind(username)
        .fetch_all(pool)
        .await
    }

    /// Full project rows where `username` holds `role`.
    pub async fn list_projects_with_role(
        pool: &PgPool,
        username: &str,
        role: &str,
    ) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            "SELECT p.id, p.title, p.description, p.bibtex, p.archived, p.template_id,
                    p.created_at, p.updated_at
             FROM projects_to_accounts pa
             JOIN projects p ON p.id = pa.project_id
             WHERE pa.username = $1 AND pa.role = $2
             ORDER BY p.created_at",
        )
        .bind(username)
        .bind(role)
        .fetch_all(pool)
        .await
    }
}
