//! Link model and DTOs.

use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `links` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Link {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub url: String,
    pub pending: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a link.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLink {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(url)]
    pub url: String,
}

/// DTO for editing a link. Only provided fields are changed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLink {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
}
