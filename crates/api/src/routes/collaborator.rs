use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::collaborator;
use crate::state::AppState;

/// Routes mounted at `/collaborator`.
///
/// ```text
/// GET    /                                          -> list
/// POST   /                                          -> create
/// PUT    /{id}                                      -> rename
/// DELETE /{id}                                      -> delete
/// GET    /project/{project_id}                      -> project_collaborators
/// POST   /project/{project_id}                      -> attach
/// DELETE /project/{project_id}/{collaborator_id}    -> detach
/// POST   /request/{request_id}/{collaborator_id}    -> propose
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(collaborator::list).post(collaborator::create))
        .route(
            "/{id}",
            put(collaborator::rename).delete(collaborator::delete),
        )
        .route(
            "/project/{project_id}",
            get(collaborator::project_collaborators).post(collaborator::attach),
        )
        .route(
            "/project/{project_id}/{collaborator_id}",
            delete(collaborator::detach),
        )
        .route(
            "/request/{request_id}/{collaborator_id}",
            post(collaborator::propose),
        )
}
