//! Media model and DTOs.
//!
//! The bytes themselves live in the file store under `path`.

use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub path: String,
    pub pending: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload assembled by the media service after an upload.
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub project_id: DbId,
    pub name: String,
    pub path: String,
    pub pending: bool,
}

/// DTO for renaming a media item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMedia {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}
