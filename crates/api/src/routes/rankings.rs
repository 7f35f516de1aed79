use axum::routing::get;
use axum::Router;

use crate::handlers::rankings;
use crate::state::AppState;

/// Filter options and rankings, merged at the `/api/v1` root.
///
/// ```text
/// GET    /filters     -> list_filters
/// GET    /rankings    -> get_rankings (?year=&city=&category=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/filters", get(rankings::list_filters))
        .route("/rankings", get(rankings::get_rankings))
}
