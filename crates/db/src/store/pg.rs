//! PostgreSQL-backed [`DiningStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use platebook_core::dining::{generate_friend_code, Dish, Place, UserProfile};
use platebook_core::types::{DbId, UserId};

use super::{DiningStore, StoreError, StoreResult, FRIEND_CODE_ATTEMPTS};
use crate::models::dish::{CreateDish, UpdateDish};
use crate::models::place::CreatePlace;
use crate::repositories::{DishRepo, PlaceRepo, UserRepo};
use crate::DbPool;

/// Delegates to the repositories and maps rows into domain records.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn is_friend_code_clash(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some("uq_users_friend_code"),
        _ => false,
    }
}

#[async_trait]
impl DiningStore for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_place(&self, created_by: UserId, input: &CreatePlace) -> StoreResult<Place> {
        let row = PlaceRepo::create(&self.pool, created_by, input).await?;
        Ok(row.into())
    }

    async fn get_place(&self, id: DbId) -> StoreResult<Option<Place>> {
        Ok(PlaceRepo::find_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn list_places_by_city(&self, city: &str) -> StoreResult<Vec<Place>> {
        let rows = PlaceRepo::list_by_city(&self.pool, city).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all_places_map(&self) -> StoreResult<HashMap<DbId, Place>> {
        let rows = PlaceRepo::list_all(&self.pool).await?;
        Ok(rows.into_iter().map(|r| (r.id, Place::from(r))).collect())
    }

    async fn update_place_maps_url(
        &self,
        id: DbId,
        maps_url: Option<&str>,
    ) -> StoreResult<Option<Place>> {
        let row = PlaceRepo::update_maps_url(&self.pool, id, maps_url).await?;
        Ok(row.map(Into::into))
    }

    async fn mark_visited(&self, id: DbId, user_id: UserId) -> StoreResult<Option<Place>> {
        let row = PlaceRepo::add_visitor(&self.pool, id, user_id).await?;
        Ok(row.map(Into::into))
    }

    async fn list_cities(&self) -> StoreResult<Vec<String>> {
        Ok(PlaceRepo::list_cities(&self.pool).await?)
    }

    async fn create_dish(
        &self,
        place_id: DbId,
        author: UserId,
        author_name: &str,
        input: &CreateDish,
    ) -> StoreResult<Dish> {
        let row = DishRepo::create(&self.pool, place_id, author, author_name, input).await?;
        Ok(row.into())
    }

    async fn get_dish(&self, id: DbId) -> StoreResult<Option<Dish>> {
        Ok(DishRepo::find_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn list_dishes_by_place(&self, place_id: DbId) -> StoreResult<Vec<Dish>> {
        let rows = DishRepo::list_by_place(&self.pool, place_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_dishes_by_user(&self, user_id: UserId) -> StoreResult<Vec<Dish>> {
        let rows = DishRepo::list_by_user(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all_dishes(&self) -> StoreResult<Vec<Dish>> {
        let rows = DishRepo::list_all(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_dish(&self, id: DbId, input: &UpdateDish) -> StoreResult<Option<Dish>> {
        Ok(DishRepo::update(&self.pool, id, input).await?.map(Into::into))
    }

    async fn delete_dish(&self, id: DbId) -> StoreResult<bool> {
        Ok(DishRepo::delete(&self.pool, id).await?)
    }

    async fn list_dish_types(&self) -> StoreResult<Vec<String>> {
        Ok(DishRepo::list_dish_types(&self.pool).await?)
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<UserProfile>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn ensure_user(&self, id: UserId, display_name: &str) -> StoreResult<UserProfile> {
        if let Some(existing) = UserRepo::find_by_id(&self.pool, id).await? {
            return Ok(existing.into());
        }

        for attempt in 1..=FRIEND_CODE_ATTEMPTS {
            let code = generate_friend_code();
            match UserRepo::insert_if_absent(&self.pool, id, display_name, &code).await {
                Ok(Some(row)) => {
                    tracing::info!(user_id = %id, "User profile created");
                    return Ok(row.into());
                }
                // Created concurrently by another request.
                Ok(None) => {
                    let row = UserRepo::find_by_id(&self.pool, id)
                        .await?
                        .ok_or(sqlx::Error::RowNotFound)?;
                    return Ok(row.into());
                }
                Err(err) if is_friend_code_clash(&err) => {
                    tracing::warn!(user_id = %id, attempt, "Friend code clash, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(StoreError::FriendCodeExhausted)
    }
}
