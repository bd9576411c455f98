use axum::routing::{get, put};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/project`.
///
/// ```text
/// GET    /                                 -> list
/// POST   /                                 -> create
/// GET    /{id}                             -> get_by_id
/// PUT    /{id}                             -> update
/// DELETE /{id}                             -> delete
/// GET    /{id}/template                    -> get_template
/// DELETE /{id}/template                    -> remove_template
/// PUT    /{id}/template/{template_id}      -> set_template
/// GET    /{id}/members/{username}          -> member_role
/// GET    /{id}/accounts                    -> accounts
/// GET    /{id}/collaborators               -> collaborators
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/template",
            get(project::get_template).delete(project::remove_template),
        )
        .route("/{id}/template/{template_id}", put(project::set_template))
        .route("/{id}/members/{username}", get(project::member_role))
        .route("/{id}/accounts", get(project::accounts))
        .route("/{id}/collaborators", get(project::collaborators))
}
