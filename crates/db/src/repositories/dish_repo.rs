//! Repository for the `dishes` table.

use platebook_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::dish::{CreateDish, DishRow, UpdateDish};

/// Column list for dishes queries.
const COLUMNS: &str = "id, place_id, user_id, author_name, dish_name, dish_type, \
    taste, portion, service, ambience, queue_minutes, price, notes, photos, \
    created_at, updated_at";

/// Provides CRUD operations for dishes.
pub struct DishRepo;

impl DishRepo {
    /// Log a dish, returning the created row.
    pub async fn create(
        pool: &PgPool,
        place_id: DbId,
        user_id: UserId,
        author_name: &str,
        input: &CreateDish,
    ) -> Result<DishRow, sqlx::Error> {
        let input = input.normalized();
        let query = format!(
            "INSERT INTO dishes
                (place_id, user_id, author_name, dish_name, dish_type,
                 taste, portion, service, ambience, queue_minutes, price, notes, photos)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DishRow>(&query)
            .bind(place_id)
            .bind(user_id)
            .bind(author_name)
            .bind(&input.dish_name)
            .bind(&input.dish_type)
            .bind(input.ratings.taste)
            .bind(input.ratings.portion)
            .bind(input.ratings.service)
            .bind(input.ratings.ambience)
            .bind(input.ratings.queue)
            .bind(input.ratings.price)
            .bind(&input.notes)
            .bind(&input.photos)
            .fetch_one(pool)
            .await
    }

    /// Find a dish by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DishRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes WHERE id = $1");
        sqlx::query_as::<_, DishRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List dishes logged at a place, newest first.
    pub async fn list_by_place(pool: &PgPool, place_id: DbId) -> Result<Vec<DishRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dishes WHERE place_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, DishRow>(&query)
            .bind(place_id)
            .fetch_all(pool)
            .await
    }

    /// List dishes logged by a user, oldest first.
    pub async fn list_by_user(pool: &PgPool, user_id: UserId) -> Result<Vec<DishRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dishes WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, DishRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List every dish, oldest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<DishRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, DishRow>(&query).fetch_all(pool).await
    }

    /// Distinct dish categories, sorted.
    pub async fn list_dish_types(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT dish_type FROM dishes ORDER BY dish_type ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a dish by ID, returning the updated row.
    ///
    /// A blank `notes` value clears the notes.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDish,
    ) -> Result<Option<DishRow>, sqlx::Error> {
        let input = input.normalized();
        let ratings = input.ratings;
        let query = format!(
            "UPDATE dishes SET
                dish_name = COALESCE($2, dish_name),
                dish_type = COALESCE($3, dish_type),
                taste = COALESCE($4, taste),
                portion = COALESCE($5, portion),
                service = COALESCE($6, service),
                ambience = COALESCE($7, ambience),
                queue_minutes = COALESCE($8, queue_minutes),
                price = CASE WHEN $9 THEN $10 ELSE price END,
                notes = CASE WHEN $11::TEXT IS NULL THEN notes ELSE NULLIF($11, '') END,
                photos = COALESCE($12, photos),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DishRow>(&query)
            .bind(id)
            .bind(&input.dish_name)
            .bind(&input.dish_type)
            .bind(ratings.map(|r| r.taste))
            .bind(ratings.map(|r| r.portion))
            .bind(ratings.map(|r| r.service))
            .bind(ratings.map(|r| r.ambience))
            .bind(ratings.map(|r| r.queue))
            .bind(ratings.is_some())
            .bind(ratings.and_then(|r| r.price))
            .bind(&input.notes)
            .bind(&input.photos)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a dish. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dishes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
