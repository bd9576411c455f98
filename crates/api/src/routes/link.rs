use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::link;
use crate::state::AppState;

/// Routes mounted at `/link`.
///
/// ```text
/// GET    /project/{project_id}                    -> list_by_project
/// POST   /project/{project_id}                    -> create
/// PUT    /{id}                                    -> update
/// DELETE /{id}                                    -> delete
/// POST   /request/{request_id}/add                -> propose_addition
/// POST   /request/{request_id}/remove/{link_id}   -> propose_removal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/project/{project_id}",
            get(link::list_by_project).post(link::create),
        )
        .route("/{id}", put(link::update).delete(link::delete))
        .route("/request/{request_id}/add", post(link::propose_addition))
        .route(
            "/request/{request_id}/remove/{link_id}",
            post(link::propose_removal),
        )
}
