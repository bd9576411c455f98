//! Account rules: password hashing, role mapping and project membership.

use portfolio_core::error::CoreError;
use portfolio_core::roles::{Role, RoleInProject, PROJECT_ROLE_PM};
use portfolio_core::types::DbId;
use portfolio_db::models::account::{
    Account, AccountSummary, CreateAccount, EditAccountRole, UpdateAccount,
};
use portfolio_db::models::project::{AccountProject, Project, ProjectAccount};
use portfolio_db::repositories::{AccountRepo, ProjectAccountRepo};
use sqlx::PgPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::AppResult;
use crate::extract::validate_input;
use crate::services::project;

pub async fn ensure_exists(pool: &PgPool, username: &str) -> AppResult<Account> {
    Ok(AccountRepo::find_by_username(pool, username)
        .await?
        .ok_or_else(|| CoreError::not_found("Account", username))?)
}

/// Register an account. A taken username surfaces as 409.
pub async fn create(
    pool: &PgPool,
    input: &CreateAccount,
    min_password_length: usize,
) -> AppResult<Account> {
    validate_input(input)?;
    validate_password_strength(&input.password, min_password_length)?;

    let password_hash = hash_password(&input.password)?;
    let role = input.role.unwrap_or(Role::User);
    let account = AccountRepo::create(
        pool,
        input.username.trim(),
        input.name.trim(),
        &password_hash,
        role.as_str(),
    )
    .await?;

    tracing::info!(username = %account.username, role = %role, "Account created");
    Ok(account)
}

pub async fn update(
    pool: &PgPool,
    username: &str,
    input: &UpdateAccount,
    min_password_length: usize,
) -> AppResult<Account> {
    validate_input(input)?;
    let password_hash = match &input.password {
        Some(password) => {
            validate_password_strength(password, min_password_length)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    Ok(AccountRepo::update(
        pool,
        username,
        input.name.as_deref(),
        password_hash.as_deref(),
        input.role.map(Role::as_str),
    )
    .await?
    .ok_or_else(|| CoreError::not_found("Account", username))?)
}

pub async fn delete(pool: &PgPool, username: &str) -> AppResult<()> {
    if !AccountRepo::delete(pool, username).await? {
        return Err(CoreError::not_found("Account", username).into());
    }
    Ok(())
}

pub async fn summaries(pool: &PgPool) -> AppResult<Vec<AccountSummary>> {
    Ok(AccountRepo::list_summaries(pool).await?)
}

pub async fn usernames(pool: &PgPool) -> AppResult<Vec<String>> {
    Ok(AccountRepo::list_usernames(pool).await?)
}

/// Usernames whose display name contains `fragment`, ignoring case.
pub async fn search(pool: &PgPool, fragment: &str) -> AppResult<Vec<String>> {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return Err(CoreError::Validation("Search name must not be empty".into()).into());
    }
    Ok(AccountRepo::search_usernames_by_name(pool, fragment).await?)
}

/// Set the account-wide role from administrator/PM flags.
pub async fn set_role(
    pool: &PgPool,
    username: &str,
    input: &EditAccountRole,
) -> AppResult<AccountSummary> {
    let role = Role::from_flags(input.is_administrator, input.is_pm);
    Ok(AccountRepo::set_role(pool, username, role.as_str())
        .await?
        .ok_or_else(|| CoreError::not_found("Account", username))?)
}

pub async fn projects(pool: &PgPool, username: &str) -> AppResult<Vec<AccountProject>> {
    ensure_exists(pool, username).await?;
    Ok(ProjectAccountRepo::list_projects_for_account(pool, username).await?)
}

/// Projects in which the account is the project manager.
pub async fn managed_projects(pool: &PgPool, username: &str) -> AppResult<Vec<Project>> {
    ensure_exists(pool, username).await?;
    Ok(ProjectAccountRepo::list_projects_with_role(pool, username, PROJECT_ROLE_PM).await?)
}

pub async fn project_role(
    pool: &PgPool,
    username: &str,
    project_id: DbId,
) -> AppResult<RoleInProject> {
    ensure_exists(pool, username).await?;
    project::user_belongs_to_project(pool, project_id, username).await
}

/// Add an account to a project. A second assignment surfaces as 409.
pub async fn assign_project_role(
    pool: &PgPool,
    username: &str,
    project_id: DbId,
    role: RoleInProject,
) -> AppResult<ProjectAccount> {
    ensure_exists(pool, username).await?;
    project::ensure_exists(pool, project_id).await?;
    Ok(ProjectAccountRepo::assign(pool, project_id, username, role.as_str()).await?)
}

pub async fn update_project_role(
    pool: &PgPool,
    username: &str,
    project_id: DbId,
    role: RoleInProject,
) -> AppResult<ProjectAccount> {
    Ok(
        ProjectAccountRepo::update_role(pool, project_id, username, role.as_str())
            .await?
            .ok_or_else(|| CoreError::not_found("ProjectAccount", format!("{project_id}/{username}")))?,
    )
}

pub async fn remove_project_role(pool: &PgPool, username: &str, project_id: DbId) -> AppResult<()> {
    if !ProjectAccountRepo::remove(pool, project_id, username).await? {
        return Err(
            CoreError::not_found("ProjectAccount", format!("{project_id}/{username}")).into(),
        );
    }
    Ok(())
}
