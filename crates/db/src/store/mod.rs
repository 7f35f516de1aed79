//! The data-store seam used by the HTTP layer.
//!
//! [`DiningStore`] returns decoded domain records so callers never see row
//! types. [`PgStore`] backs it with PostgreSQL; [`MemoryStore`] keeps
//! everything in process for tests and local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use platebook_core::dining::{Dish, Place, UserProfile};
use platebook_core::types::{DbId, UserId};

use crate::models::dish::{CreateDish, UpdateDish};
use crate::models::place::CreatePlace;

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Errors raised by a [`DiningStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A dish referenced a place that does not exist.
    #[error("Place {0} does not exist")]
    PlaceNotFound(DbId),

    /// No unique friend code could be allocated.
    #[error("Could not allocate a unique friend code")]
    FriendCodeExhausted,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read and write access to places, dishes and user profiles.
#[async_trait]
pub trait DiningStore: Send + Sync {
    /// Verify the backing store is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    // -- places -----------------------------------------------------------

    async fn create_place(&self, created_by: UserId, input: &CreatePlace) -> StoreResult<Place>;

    async fn get_place(&self, id: DbId) -> StoreResult<Option<Place>>;

    /// Places whose canonical city key matches `city`, sorted by name.
    async fn list_places_by_city(&self, city: &str) -> StoreResult<Vec<Place>>;

    async fn list_all_places_map(&self) -> StoreResult<HashMap<DbId, Place>>;

    async fn update_place_maps_url(
        &self,
        id: DbId,
        maps_url: Option<&str>,
    ) -> StoreResult<Option<Place>>;

    async fn mark_visited(&self, id: DbId, user_id: UserId) -> StoreResult<Option<Place>>;

    /// One display spelling per canonical city, sorted.
    async fn list_cities(&self) -> StoreResult<Vec<String>>;

    // -- dishes -----------------------------------------------------------

    /// Log a dish. Fails with [`StoreError::PlaceNotFound`] (memory) or a
    /// foreign-key violation (Postgres) when the place does not exist.
    async fn create_dish(
        &self,
        place_id: DbId,
        author: UserId,
        author_name: &str,
        input: &CreateDish,
    ) -> StoreResult<Dish>;

    async fn get_dish(&self, id: DbId) -> StoreResult<Option<Dish>>;

    /// Dishes at a place, newest first.
    async fn list_dishes_by_place(&self, place_id: DbId) -> StoreResult<Vec<Dish>>;

    /// Dishes by one author, oldest first.
    async fn list_dishes_by_user(&self, user_id: UserId) -> StoreResult<Vec<Dish>>;

    /// Every dish, oldest first.
    async fn list_all_dishes(&self) -> StoreResult<Vec<Dish>>;

    async fn update_dish(&self, id: DbId, input: &UpdateDish) -> StoreResult<Option<Dish>>;

    async fn delete_dish(&self, id: DbId) -> StoreResult<bool>;

    /// Distinct normalized dish categories, sorted.
    async fn list_dish_types(&self) -> StoreResult<Vec<String>>;

    // -- users ------------------------------------------------------------

    async fn get_user(&self, id: UserId) -> StoreResult<Option<UserProfile>>;

    /// Return the profile for `id`, creating it with a fresh friend code if
    /// it does not exist yet.
    async fn ensure_user(&self, id: UserId, display_name: &str) -> StoreResult<UserProfile>;
}

/// Attempts at drawing a friend code that is not taken yet.
pub const FRIEND_CODE_ATTEMPTS: usize = 5;
