//! Handlers for user profiles and per-user statistics.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use platebook_core::error::CoreError;
use platebook_core::ranking::available_years;
use platebook_core::stats::{compute_user_stats, stats_default_year};
use platebook_core::types::{DbId, UserId};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub year: Option<String>,
}

/// GET /api/v1/users/me
///
/// The caller's profile, created with a fresh friend code on first call.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = state
        .store
        .ensure_user(auth.user_id, &auth.display_name_or_default())
        .await?;

    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<impl IntoResponse> {
    let profile = state
        .store
        .get_user(id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id))?;

    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/users/{id}/stats
///
/// Statistics over one calendar year of the user's dishes. Without `year`
/// the current year is used when it has data, else the latest year that
/// does.
pub async fn user_stats(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Query(params): Query<StatsParams>,
) -> AppResult<impl IntoResponse> {
    let dishes = state.store.list_dishes_by_user(id).await?;

    let year = match params.year.as_deref().map(str::trim).filter(|y| !y.is_empty()) {
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| AppError::BadRequest(format!("year must be a calendar year, got '{raw}'")))?,
        None => stats_default_year(&available_years(&dishes), Utc::now().year()),
    };

    let city_by_place: HashMap<DbId, String> = state
        .store
        .list_all_places_map()
        .await?
        .into_iter()
        .map(|(place_id, place)| (place_id, place.city))
        .collect();

    let stats = compute_user_stats(&dishes, &city_by_place, year);

    tracing::debug!(user_id = %id, year, dishes = stats.total_dishes, "User stats computed");

    Ok(Json(DataResponse { data: stats }))
}
