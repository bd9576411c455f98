use axum::routing::{get, put};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/account`.
///
/// ```text
/// GET    /                                        -> list
/// POST   /                                        -> create
/// GET    /usernames                               -> usernames
/// GET    /search?name=                            -> search
/// GET    /{username}                              -> get_by_username
/// PUT    /{username}                              -> update
/// DELETE /{username}                              -> delete
/// PUT    /{username}/role                         -> set_role
/// GET    /{username}/projects                     -> projects
/// GET    /{username}/managed                      -> managed_projects
/// GET    /{username}/projects/{project_id}/role   -> get_project_role
/// POST   /{username}/projects/{project_id}/role   -> assign_project_role
/// PUT    /{username}/projects/{project_id}/role   -> update_project_role
/// DELETE /{username}/projects/{project_id}/role   -> remove_project_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(account::list).post(account::create))
        .route("/usernames", get(account::usernames))
        .route("/search", get(account::search))
        .route(
            "/{username}",
            get(account::get_by_username)
                .put(account::update)
                .delete(account::delete),
        )
        .route("/{username}/role", put(account::set_role))
        .route("/{username}/projects", get(account::projects))
        .route("/{username}/managed", get(account::managed_projects))
        .route(
            "/{username}/projects/{project_id}/role",
            get(account::get_project_role)
                .post(account::assign_project_role)
                .put(account::update_project_role)
                .delete(account::remove_project_role),
        )
}
