//! Handlers for filter options and rankings.
//!
//! Rankings are recomputed from a fresh snapshot on every request and are
//! best effort: a snapshot that cannot be loaded yields empty lists.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use platebook_core::dining::{Dish, Place};
use platebook_core::normalize::non_empty_filter;
use platebook_core::ranking::{
    available_years, compute_rankings, default_year, relabel_authors, RankingFilter, Rankings,
    YearFilter,
};
use platebook_core::types::DbId;
use platebook_db::store::StoreResult;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::names::resolve_missing_names;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RankingParams {
    /// `all` or a calendar year; absent selects the default year.
    pub year: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
}

/// Selectable filter values.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub dish_types: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RankingsView {
    #[serde(flatten)]
    pub rankings: Rankings,
    /// `None` when every year is included.
    pub selected_year: Option<i32>,
    pub city: Option<String>,
    pub category: Option<String>,
}

/// GET /api/v1/filters
pub async fn list_filters(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let (cities, dish_types) =
        futures::try_join!(state.store.list_cities(), state.store.list_dish_types())?;

    Ok(Json(DataResponse {
        data: FilterOptions { cities, dish_types },
    }))
}

async fn load_snapshot(state: &AppState) -> StoreResult<(Vec<Dish>, HashMap<DbId, Place>)> {
    futures::try_join!(
        state.store.list_all_dishes(),
        state.store.list_all_places_map()
    )
}

/// GET /api/v1/rankings
///
/// Rankings are computed with the names already cached, then names for the
/// authors in the filtered view are fetched and the author list relabeled
/// from the cache, which may also hold names other requests resolved.
pub async fn get_rankings(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> AppResult<impl IntoResponse> {
    let requested_year = params
        .year
        .as_deref()
        .map(YearFilter::parse)
        .transpose()
        .map_err(AppError::BadRequest)?;
    let city = non_empty_filter(params.city.as_deref()).map(str::to_string);
    let category = non_empty_filter(params.category.as_deref()).map(str::to_string);

    let (dishes, places) = match load_snapshot(&state).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::warn!(error = %err, "Ranking snapshot unavailable, returning empty rankings");
            return Ok(Json(DataResponse {
                data: RankingsView {
                    rankings: Rankings::default(),
                    selected_year: requested_year.and_then(YearFilter::as_year),
                    city,
                    category,
                },
            }));
        }
    };

    let year = requested_year
        .unwrap_or_else(|| default_year(&available_years(&dishes), Utc::now().year()));
    let filter = RankingFilter::new(year, city.as_deref(), category.as_deref());

    let mut rankings = {
        let names = state.names.read().await;
        compute_rankings(&dishes, &places, &names, &filter)
    };

    resolve_missing_names(state.store.as_ref(), &state.names, &rankings.authors).await;
    relabel_authors(&mut rankings.top_authors, &*state.names.read().await);

    tracing::debug!(
        dishes = dishes.len(),
        year = ?filter.year(),
        city = ?filter.city_key(),
        category = ?filter.category(),
        "Rankings computed",
    );

    Ok(Json(DataResponse {
        data: RankingsView {
            rankings,
            selected_year: year.as_year(),
            city,
            category,
        },
    }))
}
