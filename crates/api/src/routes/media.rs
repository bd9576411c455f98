use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Upper bound on a multipart media upload.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Routes mounted at `/media`.
///
/// ```text
/// GET    /project/{project_id}                     -> list_documents
/// POST   /project/{project_id}                     -> upload
/// GET    /project/{project_id}/images              -> list_images
/// PUT    /{id}                                     -> rename
/// DELETE /{id}                                     -> delete
/// GET    /{id}/content                             -> get_content
/// PUT    /{id}/content                             -> replace_content
/// GET    /request/{request_id}                     -> request_entries
/// POST   /request/{request_id}/add                 -> propose_addition
/// POST   /request/{request_id}/remove/{media_id}   -> propose_removal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/project/{project_id}",
            get(media::list_documents).post(media::upload),
        )
        .route("/project/{project_id}/images", get(media::list_images))
        .route("/{id}", put(media::rename).delete(media::delete))
        .route(
            "/{id}/content",
            get(media::get_content).put(media::replace_content),
        )
        .route("/request/{request_id}", get(media::request_entries))
        .route("/request/{request_id}/add", post(media::propose_addition))
        .route(
            "/request/{request_id}/remove/{media_id}",
            post(media::propose_removal),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
