//! Project entity model, membership rows and DTOs.

use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub bibtex: Option<String>,
    pub archived: bool,
    pub template_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub bibtex: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// DTO for updating a project. Replaces every mutable field.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub bibtex: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// A row from the `projects_to_accounts` join table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectAccount {
    pub id: DbId,
    pub project_id: DbId,
    pub username: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An account that belongs to a project, with its role there.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMember {
    pub username: String,
    pub name: String,
    pub role: String,
}

/// A project an account belongs to, with the account's role there.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccountProject {
    pub project_id: DbId,
    pub title: String,
    pub role: String,
}
