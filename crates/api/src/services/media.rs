//! Media rules: path construction, uniqueness, and keeping stored content
//! in step with the `media` rows.

use portfolio_core::error::CoreError;
use portfolio_core::media::{build_media_path, is_image, validate_media_name};
use portfolio_core::storage::FileStore;
use portfolio_core::types::DbId;
use portfolio_db::models::media::{Media, NewMedia, UpdateMedia};
use portfolio_db::models::request::{ChangeKind, RequestChange, RequestMediaEntry};
use portfolio_db::repositories::{MediaRepo, RequestRepo};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::extract::validate_input;
use crate::services::{project, request};

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    /// Client-side file name; becomes the last path component.
    pub file_name: String,
    /// Display name. Defaults to `file_name`.
    pub name: Option<String>,
    pub data: Vec<u8>,
}

impl MediaUpload {
    fn display_name(&self) -> AppResult<String> {
        let name = self
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.file_name.as_str())
            .trim()
            .to_string();
        validate_media_name(&name)?;
        Ok(name)
    }
}

pub async fn ensure_exists(pool: &PgPool, id: DbId) -> AppResult<Media> {
    Ok(MediaRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Media", id))?)
}

/// Non-image media of a project.
pub async fn list_documents(pool: &PgPool, project_id: DbId) -> AppResult<Vec<Media>> {
    project::ensure_exists(pool, project_id).await?;
    let media = MediaRepo::list_by_project(pool, project_id).await?;
    Ok(media.into_iter().filter(|m| !is_image(&m.path)).collect())
}

/// Image media of a project.
pub async fn list_images(pool: &PgPool, project_id: DbId) -> AppResult<Vec<Media>> {
    project::ensure_exists(pool, project_id).await?;
    let media = MediaRepo::list_by_project(pool, project_id).await?;
    Ok(media.into_iter().filter(|m| is_image(&m.path)).collect())
}

/// Store an uploaded file as media of a project.
pub async fn upload(
    pool: &PgPool,
    store: &dyn FileStore,
    project_id: DbId,
    upload: MediaUpload,
) -> AppResult<Media> {
    project::ensure_exists(pool, project_id).await?;
    let input = new_media(pool, project_id, &upload, false).await?;

    let media = MediaRepo::create(pool, &input).await?;
    if let Err(e) = store.put(&media.path, &upload.data).await {
        MediaRepo::delete(pool, media.id).await?;
        return Err(e.into());
    }

    tracing::info!(media_id = %media.id, project_id = %project_id, path = %media.path, "Media uploaded");
    Ok(media)
}

/// Media metadata and its stored bytes.
pub async fn content(pool: &PgPool, store: &dyn FileStore, id: DbId) -> AppResult<(Media, Vec<u8>)> {
    let media = ensure_exists(pool, id).await?;
    let bytes = store.get(&media.path).await?;
    Ok((media, bytes))
}

pub async fn rename(pool: &PgPool, id: DbId, input: &UpdateMedia) -> AppResult<Media> {
    validate_input(input)?;
    validate_media_name(&input.name)?;
    Ok(MediaRepo::rename(pool, id, input.name.trim())
        .await?
        .ok_or_else(|| CoreError::not_found("Media", id))?)
}

/// Overwrite the stored content of a media item. Its path is unchanged.
pub async fn replace_content(
    pool: &PgPool,
    store: &dyn FileStore,
    id: DbId,
    data: &[u8],
) -> AppResult<Media> {
    let media = ensure_exists(pool, id).await?;
    store.put(&media.path, data).await?;
    Ok(MediaRepo::touch(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Media", id))?)
}

/// Delete a media row and its stored content.
pub async fn delete(pool: &PgPool, store: &dyn FileStore, id: DbId) -> AppResult<Media> {
    let media = MediaRepo::delete(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Media", id))?;
    project::remove_stored_files(store, std::slice::from_ref(&media.path)).await;
    tracing::info!(media_id = %id, project_id = %media.project_id, "Media deleted");
    Ok(media)
}

/// Media deltas of a request with the media they refer to.
pub async fn request_entries(pool: &PgPool, request_id: DbId) -> AppResult<Vec<RequestMediaEntry>> {
    request::ensure_exists(pool, request_id).await?;
    Ok(RequestRepo::media_entries(pool, request_id).await?)
}

/// Upload a file proposed for addition by a request. The media stays
/// pending until the request is accepted.
pub async fn propose_addition(
    pool: &PgPool,
    store: &dyn FileStore,
    request_id: DbId,
    upload: MediaUpload,
) -> AppResult<Media> {
    let req = request::ensure_exists(pool, request_id).await?;
    let input = new_media(pool, req.project_id, &upload, true).await?;

    let media = RequestRepo::add_pending_media(pool, request_id, &input).await?;
    if let Err(e) = store.put(&media.path, &upload.data).await {
        MediaRepo::delete(pool, media.id).await?;
        return Err(e.into());
    }

    tracing::info!(media_id = %media.id, request_id = %request_id, "Media proposed for addition");
    Ok(media)
}

/// Propose removing an existing media item of the request's project.
pub async fn propose_removal(
    pool: &PgPool,
    request_id: DbId,
    media_id: DbId,
) -> AppResult<(DbId, RequestChange)> {
    let req = request::ensure_exists(pool, request_id).await?;
    let media = ensure_exists(pool, media_id).await?;
    if media.project_id != req.project_id {
        return Err(CoreError::Validation(format!(
            "Media {media_id} does not belong to project {}",
            req.project_id
        ))
        .into());
    }
    if media.pending {
        return Err(CoreError::Validation(format!(
            "Media {media_id} is itself a pending proposal"
        ))
        .into());
    }
    let change = RequestRepo::add_change(pool, request_id, ChangeKind::Media, media_id, true).await?;
    Ok((req.project_id, change))
}

async fn new_media(
    pool: &PgPool,
    project_id: DbId,
    upload: &MediaUpload,
    pending: bool,
) -> AppResult<NewMedia> {
    let name = upload.display_name()?;
    let path = build_media_path(project_id, &upload.file_name)?;
    if MediaRepo::path_exists(pool, &path).await? {
        return Err(CoreError::Forbidden(format!("Media path '{path}' is already in use")).into());
    }
    Ok(NewMedia {
        project_id,
        name,
        path,
        pending,
    })
}
