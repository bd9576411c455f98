use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Routes mounted at `/tags`.
///
/// ```text
/// GET    /                                 -> list_tags
/// POST   /                                 -> create_tag
/// PUT    /{id}                             -> update_tag
/// DELETE /{id}                             -> delete_tag
/// GET    /project/{project_id}             -> project_tags
/// POST   /project/{project_id}/{tag_id}    -> attach_tag
/// DELETE /project/{project_id}/{tag_id}    -> detach_tag
/// POST   /request/{request_id}/{tag_id}    -> propose_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags).post(tags::create_tag))
        .route("/{id}", put(tags::update_tag).delete(tags::delete_tag))
        .route("/project/{project_id}", get(tags::project_tags))
        .route(
            "/project/{project_id}/{tag_id}",
            post(tags::attach_tag).delete(tags::detach_tag),
        )
        .route("/request/{request_id}/{tag_id}", post(tags::propose_tag))
}
