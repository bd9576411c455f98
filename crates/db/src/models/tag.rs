//! Tag model and DTOs.

use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tag.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTag {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 4, max = 9))]
    pub color: Option<String>,
}

/// DTO for editing a tag. Only provided fields are changed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTag {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,
    #[validate(length(min = 4, max = 9))]
    pub color: Option<String>,
}
