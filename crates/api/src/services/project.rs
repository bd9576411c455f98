//! Project rules: duplicate detection, ownership on create, template
//! association and membership checks.

use portfolio_core::error::CoreError;
use portfolio_core::roles::{RoleInProject, PROJECT_ROLE_PM};
use portfolio_core::storage::FileStore;
use portfolio_core::types::DbId;
use portfolio_db::models::collaborator::ProjectCollaborator;
use portfolio_db::models::project::{CreateProject, Project, ProjectMember, UpdateProject};
use portfolio_db::models::template::Template;
use portfolio_db::repositories::{
    AccountRepo, CollaboratorRepo, MediaRepo, ProjectAccountRepo, ProjectRepo, TemplateRepo,
};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::validate_input;

/// Load a project or fail with 404.
pub async fn ensure_exists(pool: &PgPool, id: DbId) -> AppResult<Project> {
    Ok(ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id))?)
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<Project>> {
    Ok(ProjectRepo::list(pool).await?)
}

/// Create a project. When `owner` is given it is recorded as the project's PM.
pub async fn create(
    pool: &PgPool,
    input: &CreateProject,
    owner: Option<&str>,
) -> AppResult<Project> {
    validate_input(input)?;

    if ProjectRepo::find_by_title_and_description(pool, &input.title, &input.description)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict(format!(
            "A project titled '{}' with this description already exists",
            input.title
        ))
        .into());
    }

    let project = match owner {
        Some(username) => {
            if !AccountRepo::exists(pool, username).await? {
                return Err(CoreError::not_found("Account", username).into());
            }
            ProjectRepo::create_with_owner(pool, input, username, PROJECT_ROLE_PM).await?
        }
        None => ProjectRepo::create(pool, input).await?,
    };

    tracing::info!(project_id = %project.id, owner = ?owner, "Project created");
    Ok(project)
}

pub async fn update(pool: &PgPool, id: DbId, input: &UpdateProject) -> AppResult<Project> {
    validate_input(input)?;
    Ok(ProjectRepo::update(pool, id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id))?)
}

/// Delete a project and the stored content of all its media.
pub async fn delete(pool: &PgPool, store: &dyn FileStore, id: DbId) -> AppResult<()> {
    ensure_exists(pool, id).await?;
    let paths = MediaRepo::list_paths_by_project(pool, id).await?;

    if !ProjectRepo::delete(pool, id).await? {
        return Err(CoreError::not_found("Project", id).into());
    }

    remove_stored_files(store, &paths).await;
    tracing::info!(project_id = %id, media = paths.len(), "Project deleted");
    Ok(())
}

/// The template of a project, if it has one.
pub async fn template_of(pool: &PgPool, id: DbId) -> AppResult<Option<Template>> {
    let project = ensure_exists(pool, id).await?;
    match project.template_id {
        Some(template_id) => Ok(TemplateRepo::find_by_id(pool, template_id).await?),
        None => Ok(None),
    }
}

pub async fn set_template(pool: &PgPool, id: DbId, template_id: DbId) -> AppResult<Project> {
    TemplateRepo::find_by_id(pool, template_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Template", template_id))?;
    Ok(ProjectRepo::set_template(pool, id, Some(template_id))
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id))?)
}

pub async fn clear_template(pool: &PgPool, id: DbId) -> AppResult<Project> {
    Ok(ProjectRepo::set_template(pool, id, None)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id))?)
}

/// The role `username` holds in a project.
///
/// Fails with 404 if the project does not exist and 403 if the account is
/// not a member.
pub async fn user_belongs_to_project(
    pool: &PgPool,
    project_id: DbId,
    username: &str,
) -> AppResult<RoleInProject> {
    ensure_exists(pool, project_id).await?;
    let role = ProjectAccountRepo::find_role(pool, project_id, username)
        .await?
        .ok_or_else(|| {
            CoreError::Forbidden(format!(
                "Account '{username}' is not a member of project {project_id}"
            ))
        })?;
    Ok(role.parse::<RoleInProject>()?)
}

pub async fn members(pool: &PgPool, id: DbId) -> AppResult<Vec<ProjectMember>> {
    ensure_exists(pool, id).await?;
    Ok(ProjectAccountRepo::list_members(pool, id).await?)
}

pub async fn collaborators(pool: &PgPool, id: DbId) -> AppResult<Vec<ProjectCollaborator>> {
    ensure_exists(pool, id).await?;
    Ok(CollaboratorRepo::list_by_project(pool, id).await?)
}

/// Delete stored media content after the rows are gone. Failures are logged
/// and skipped.
pub(crate) async fn remove_stored_files(store: &dyn FileStore, paths: &[String]) {
    for path in paths {
        if let Err(e) = store.delete(path).await {
            tracing::warn!(path = %path, error = %e, "Failed to delete stored media content");
        }
    }
}
