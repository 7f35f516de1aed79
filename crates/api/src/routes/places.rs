use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{dishes, places};
use crate::state::AppState;

/// Place routes mounted at `/places`.
///
/// ```text
/// GET    /                  -> list_places (?city=)
/// POST   /                  -> create_place
/// GET    /{id}              -> get_place
/// PATCH  /{id}/maps-url     -> update_maps_url
/// POST   /{id}/visit        -> mark_visited
/// GET    /{id}/dishes       -> list_place_dishes
/// POST   /{id}/dishes       -> create_dish
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(places::list_places).post(places::create_place))
        .route("/{id}", get(places::get_place))
        .route("/{id}/maps-url", patch(places::update_maps_url))
        .route("/{id}/visit", post(places::mark_visited))
        .route(
            "/{id}/dishes",
            get(dishes::list_place_dishes).post(dishes::create_dish),
        )
}
