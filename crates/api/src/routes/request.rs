use axum::routing::{get, post};
use axum::Router;

use crate::handlers::request;
use crate::state::AppState;

/// Routes mounted at `/request`.
///
/// ```text
/// GET    /                          -> list
/// GET    /project/{project_id}      -> list_by_project
/// POST   /project/{project_id}      -> create
/// GET    /user/{username}           -> list_by_user
/// GET    /{id}                      -> get_by_id
/// DELETE /{id}                      -> reject
/// POST   /{id}/accept               -> accept
/// POST   /{id}/counter-offer        -> counter_offer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(request::list))
        .route(
            "/project/{project_id}",
            get(request::list_by_project).post(request::create),
        )
        .route("/user/{username}", get(request::list_by_user))
        .route("/{id}", get(request::get_by_id).delete(request::reject))
        .route("/{id}/accept", post(request::accept))
        .route("/{id}/counter-offer", post(request::counter_offer))
}
