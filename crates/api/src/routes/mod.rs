pub mod dishes;
pub mod health;
pub mod places;
pub mod rankings;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /places                          list (?city=), create
/// /places/{id}                     get
/// /places/{id}/maps-url            update map link (PATCH)
/// /places/{id}/visit               mark caller as visitor (POST)
/// /places/{id}/dishes              list (newest first), log dish
///
/// /dishes/{id}                     get, update, delete (author only)
///
/// /users/me                        caller profile, created on first call
/// /users/{id}                      get profile
/// /users/{id}/stats                per-user statistics (?year=)
///
/// /filters                         cities and dish categories
/// /rankings                        rankings (?year=&city=&category=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/places", places::router())
        .nest("/dishes", dishes::router())
        .nest("/users", users::router())
        .merge(rankings::router())
}
