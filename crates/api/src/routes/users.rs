use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// GET    /me            -> me
/// GET    /{id}          -> get_user
/// GET    /{id}/stats    -> user_stats (?year=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me))
        .route("/{id}", get(users::get_user))
        .route("/{id}/stats", get(users::user_stats))
}
