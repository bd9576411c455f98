//! Repository for `collaborators` and `projects_to_collaborators`.

use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::collaborator::{Collaborator, ProjectCollaborator};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for collaborators and their project links.
pub struct CollaboratorRepo;

impl CollaboratorRepo {
    pub async fn create(pool: &PgPool, name: &str) -> Result<Collaborator, sqlx::Error> {
        let query = format!("INSERT INTO collaborators (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Collaborator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collaborators WHERE id = $1");
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The oldest collaborator with exactly this name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Collaborator>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collaborators WHERE name = $1 ORDER BY created_at LIMIT 1"
        );
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Collaborator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collaborators ORDER BY name, id");
        sqlx::query_as::<_, Collaborator>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Collaborator>, sqlx::Error> {
        let query = format!("UPDATE collaborators SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a collaborator. Project links and pending deltas cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collaborators WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Collaborators attached to a project.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectCollaborator>, sqlx::Error> {
        sqlx::query_as::<_, ProjectCollaborator>(
            "SELECT c.id, c.name, pc.role_in_project
             FROM projects_to_collaborators pc
             JOIN collaborators c ON c.id = pc.collaborator_id
             WHERE pc.project_id = $1
             ORDER BY pc.created_at",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Attach a collaborator to a project, replacing the role text if the
    /// link already exists.
    pub async fn attach(
        pool: &PgPool,
        project_id: DbId,
        collaborator_id: DbId,
        role_in_project: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO projects_to_collaborators (project_id, collaborator_id, role_in_project)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_projects_to_collaborators
             DO UPDATE SET role_in_project = EXCLUDED.role_in_project",
        )
        .bind(project_id)
        .bind(collaborator_id)
        .bind(role_in_project)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Detach a collaborator from a project. Returns `true` if it was attached.
    pub async fn detach(
        pool: &PgPool,
        project_id: DbId,
        collaborator_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM projects_to_collaborators WHERE project_id = $1 AND collaborator_id = $2",
        )
        .bind(project_id)
        .bind(collaborator_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
