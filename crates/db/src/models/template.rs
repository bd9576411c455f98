//! Project template model and DTOs.

use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Template {
    pub id: DbId,
    pub title: String,
    pub standard_description: Option<String>,
    pub number_of_collaborators: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a template.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplate {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub standard_description: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub number_of_collaborators: i32,
}

/// DTO for updating a template. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTemplate {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub standard_description: Option<String>,
    #[validate(range(min = 0))]
    pub number_of_collaborators: Option<i32>,
}
