pub mod account;
pub mod collaborator;
pub mod health;
pub mod link;
pub mod media;
pub mod project;
pub mod request;
pub mod tags;
pub mod template;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws/{topic}                                       WebSocket subscription
///
/// /project                                          list, create
/// /project/{id}                                     get, update, delete
/// /project/{id}/template                            get, remove
/// /project/{id}/template/{template_id}              set
/// /project/{id}/members/{username}                  member role
/// /project/{id}/accounts                            members with roles
/// /project/{id}/collaborators                       collaborators with roles
///
/// /template                                         list, create
/// /template/{id}                                    get, update, delete
///
/// /media/project/{project_id}                       documents, upload
/// /media/project/{project_id}/images                images
/// /media/{id}                                       rename, delete
/// /media/{id}/content                               download, replace
/// /media/request/{request_id}                       media deltas
/// /media/request/{request_id}/add                   proposed upload
/// /media/request/{request_id}/remove/{media_id}     proposed removal
///
/// /tags                                             list, create
/// /tags/{id}                                        update, delete
/// /tags/project/{project_id}                        tags of project
/// /tags/project/{project_id}/{tag_id}               attach, detach
/// /tags/request/{request_id}/{tag_id}               proposed change
///
/// /collaborator                                     list, create
/// /collaborator/{id}                                rename, delete
/// /collaborator/project/{project_id}                list, attach
/// /collaborator/project/{project_id}/{id}           detach
/// /collaborator/request/{request_id}/{id}           proposed change
///
/// /link/project/{project_id}                        list, create
/// /link/{id}                                        update, delete
/// /link/request/{request_id}/add                    proposed addition
/// /link/request/{request_id}/remove/{link_id}       proposed removal
///
/// /request                                          list
/// /request/project/{project_id}                     list, create
/// /request/user/{username}                          list
/// /request/{id}                                     get, reject
/// /request/{id}/accept                              accept
/// /request/{id}/counter-offer                       counter-offer
///
/// /account                                          list, create
/// /account/usernames                                all usernames
/// /account/search?name=                             search by name
/// /account/{username}                               get, update, delete
/// /account/{username}/role                          account-wide role
/// /account/{username}/projects                      memberships
/// /account/{username}/managed                       projects managed
/// /account/{username}/projects/{project_id}/role    get, assign, update, remove
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Topic-scoped change notifications.
        .route("/ws/{topic}", get(ws::ws_handler))
        .nest("/project", project::router())
        .nest("/template", template::router())
        .nest("/media", media::router())
        .nest("/tags", tags::router())
        .nest("/collaborator", collaborator::router())
        .nest("/link", link::router())
        .nest("/request", request::router())
        .nest("/account", account::router())
}
