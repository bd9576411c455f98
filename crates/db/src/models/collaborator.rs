//! Collaborator model and DTOs.

use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `collaborators` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collaborator {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A collaborator attached to a project, with its role text there.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectCollaborator {
    pub id: DbId,
    pub name: String,
    pub role_in_project: Option<String>,
}

/// DTO for creating or renaming a collaborator.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CollaboratorInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// DTO for attaching a collaborator to a project by name.
///
/// An existing collaborator with exactly this name is reused; otherwise one
/// is created.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttachCollaborator {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub role_in_project: Option<String>,
}
