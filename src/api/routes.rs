//! API route configuration.
//!
//! Every route sits behind [`crate::api::middleware::auth`], which resolves an
//! optional caller. Whether a route needs one is decided by its handler.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, delete_owner_link_handler, get_link_handler,
    list_owner_links_handler, login_handler, logout_handler, register_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All `/api` routes.
///
/// # Endpoints
///
/// - `POST   /users`                  - Register and receive a session token
/// - `POST   /users/login`            - Log in and receive a session token
/// - `POST   /users/logout`           - Revoke the current session
/// - `GET    /users/{user_id}/links`  - List an owner's links
/// - `DELETE /users/{user_id}/links/{link_id}` - Delete one of an owner's links
/// - `POST   /links`                  - Create a short link
/// - `GET    /links/{link_id}`        - Fetch an owned link with statistics
/// - `DELETE /links/{link_id}`        - Delete a link (owner or admin)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_handler))
        .route("/users/login", post(login_handler))
        .route("/users/logout", post(logout_handler))
        .route("/users/{user_id}/links", get(list_owner_links_handler))
        .route(
            "/users/{user_id}/links/{link_id}",
            delete(delete_owner_link_handler),
        )
        .route("/links", post(create_link_handler))
        .route(
            "/links/{link_id}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
