//! Handlers for dishes.
//!
//! Anyone may read dishes; only a dish's author may change or delete it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use platebook_core::dining::{
    validate_dish_input, validate_ratings, validate_required_text, Dish,
};
use platebook_core::error::CoreError;
use platebook_core::types::DbId;
use platebook_db::models::dish::{CreateDish, UpdateDish};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_dish(state: &AppState, id: DbId) -> AppResult<Dish> {
    Ok(state
        .store
        .get_dish(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Dish", id))?)
}

fn ensure_author(auth: &AuthUser, dish: &Dish) -> AppResult<()> {
    if dish.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can modify this dish".into(),
        )));
    }
    Ok(())
}

fn validate_update(input: &UpdateDish) -> Result<(), String> {
    if let Some(name) = &input.dish_name {
        validate_required_text("dish_name", name)?;
    }
    if let Some(dish_type) = &input.dish_type {
        validate_required_text("dish_type", dish_type)?;
    }
    if let Some(ratings) = &input.ratings {
        validate_ratings(ratings)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Place-scoped
// ---------------------------------------------------------------------------

/// GET /api/v1/places/{id}/dishes
///
/// Dishes logged at a place, newest first.
pub async fn list_place_dishes(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(place_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if state.store.get_place(place_id).await?.is_none() {
        return Err(CoreError::not_found("Place", place_id).into());
    }
    let dishes = state.store.list_dishes_by_place(place_id).await?;

    Ok(Json(DataResponse { data: dishes }))
}

/// POST /api/v1/places/{id}/dishes
///
/// Log a dish at a place. The author's display name is snapshotted from
/// their profile, which is created on first use.
pub async fn create_dish(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(place_id): Path<DbId>,
    Json(input): Json<CreateDish>,
) -> AppResult<impl IntoResponse> {
    validate_dish_input(&input.dish_name, &input.dish_type).map_err(CoreError::Validation)?;
    validate_ratings(&input.ratings).map_err(CoreError::Validation)?;

    if state.store.get_place(place_id).await?.is_none() {
        return Err(CoreError::not_found("Place", place_id).into());
    }

    let author = state
        .store
        .ensure_user(auth.user_id, &auth.display_name_or_default())
        .await?;
    let dish = state
        .store
        .create_dish(place_id, auth.user_id, &author.display_name, &input)
        .await?;

    tracing::info!(
        dish_id = dish.id,
        place_id,
        user_id = %auth.user_id,
        dish_type = %dish.dish_type,
        "Dish logged",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: dish })))
}

// ---------------------------------------------------------------------------
// Dish-scoped
// ---------------------------------------------------------------------------

/// GET /api/v1/dishes/{id}
pub async fn get_dish(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let dish = find_dish(&state, id).await?;
    Ok(Json(DataResponse { data: dish }))
}

/// PUT /api/v1/dishes/{id}
///
/// Partial update; absent fields are kept. Author only.
pub async fn update_dish(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDish>,
) -> AppResult<impl IntoResponse> {
    let existing = find_dish(&state, id).await?;
    ensure_author(&auth, &existing)?;
    validate_update(&input).map_err(CoreError::Validation)?;

    let dish = state
        .store
        .update_dish(id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Dish", id))?;

    tracing::info!(dish_id = id, user_id = %auth.user_id, "Dish updated");

    Ok(Json(DataResponse { data: dish }))
}

/// DELETE /api/v1/dishes/{id}
///
/// Author only.
pub async fn delete_dish(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_dish(&state, id).await?;
    ensure_author(&auth, &existing)?;

    if !state.store.delete_dish(id).await? {
        return Err(CoreError::not_found("Dish", id).into());
    }

    tracing::info!(dish_id = id, user_id = %auth.user_id, "Dish deleted");

    Ok(StatusCode::NO_CONTENT)
}
