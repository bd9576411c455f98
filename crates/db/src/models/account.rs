//! Account model and DTOs.

use portfolio_core::roles::{Role, RoleInProject};
use portfolio_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `accounts` table. The password hash is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub username: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering an account. `password` is plaintext and hashed before insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAccount {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub password: String,
    pub role: Option<Role>,
}

/// DTO for editing an account. Only provided fields are changed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAccount {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Compact account view used by the admin account list.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountSummary {
    pub username: String,
    pub is_administrator: bool,
    pub is_pm: bool,
}

/// Body of `PUT /account/{username}/role`.
#[derive(Debug, Clone, Deserialize)]
pub struct EditAccountRole {
    #[serde(default)]
    pub is_administrator: bool,
    #[serde(default)]
    pub is_pm: bool,
}

/// Body for assigning or changing a role inside a project.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRoleInput {
    pub role: RoleInProject,
}

/// Query string of `GET /account/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSearchParams {
    pub name: String,
}
