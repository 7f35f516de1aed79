use axum::routing::get;
use axum::Router;

use crate::handlers::dishes;
use crate::state::AppState;

/// Dish routes mounted at `/dishes`.
///
/// ```text
/// GET    /{id}    -> get_dish
/// PUT    /{id}    -> update_dish (author only)
/// DELETE /{id}    -> delete_dish (author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(dishes::get_dish)
            .put(dishes::update_dish)
            .delete(dishes::delete_dish),
    )
}
