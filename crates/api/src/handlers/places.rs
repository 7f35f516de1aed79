//! Handlers for places.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use platebook_core::dining::{validate_place_input, Place};
use platebook_core::error::CoreError;
use platebook_core::normalize::non_empty_filter;
use platebook_core::types::DbId;
use platebook_db::models::place::{normalize_maps_url, CreatePlace, UpdatePlaceMapsUrl};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlaceListParams {
    pub city: Option<String>,
}

/// GET /api/v1/places
///
/// Places in `city` (matched on the canonical city key), sorted by name.
/// Without a city every place is returned.
pub async fn list_places(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PlaceListParams>,
) -> AppResult<impl IntoResponse> {
    let places = match non_empty_filter(params.city.as_deref()) {
        Some(city) => state.store.list_places_by_city(city).await?,
        None => {
            let mut all: Vec<Place> = state.store.list_all_places_map().await?.into_values().collect();
            all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            all
        }
    };

    Ok(Json(DataResponse { data: places }))
}

/// POST /api/v1/places
///
/// The caller becomes the creator and first visitor.
pub async fn create_place(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePlace>,
) -> AppResult<impl IntoResponse> {
    validate_place_input(&input.name, &input.city).map_err(CoreError::Validation)?;

    let place = state.store.create_place(auth.user_id, &input).await?;

    tracing::info!(place_id = place.id, user_id = %auth.user_id, city = %place.city, "Place created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: place })))
}

/// GET /api/v1/places/{id}
pub async fn get_place(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let place = state
        .store
        .get_place(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Place", id))?;

    Ok(Json(DataResponse { data: place }))
}

/// PATCH /api/v1/places/{id}/maps-url
///
/// Replace the map link; a missing or blank value clears it.
pub async fn update_maps_url(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlaceMapsUrl>,
) -> AppResult<impl IntoResponse> {
    let maps_url = normalize_maps_url(input.maps_url.as_deref());
    let place = state
        .store
        .update_place_maps_url(id, maps_url.as_deref())
        .await?
        .ok_or_else(|| CoreError::not_found("Place", id))?;

    tracing::info!(place_id = id, user_id = %auth.user_id, "Place map link updated");

    Ok(Json(DataResponse { data: place }))
}

/// POST /api/v1/places/{id}/visit
///
/// Add the caller to the place's visitors. Repeated calls are no-ops.
pub async fn mark_visited(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let place = state
        .store
        .mark_visited(id, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Place", id))?;

    tracing::debug!(place_id = id, user_id = %auth.user_id, "Place visited");

    Ok(Json(DataResponse { data: place }))
}
