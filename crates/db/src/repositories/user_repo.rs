//! Repository for the `users` table.

use platebook_core::types::UserId;
use sqlx::PgPool;

use crate::models::user::UserRow;

/// Column list for users queries.
const COLUMNS: &str = "id, display_name, friend_code, friends, avatar_url, created_at";

/// Provides read and upsert operations for user profiles.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a profile unless one already exists for `id`.
    ///
    /// Returns `None` when the row already existed. A clash on the friend
    /// code surfaces as a unique violation on `uq_users_friend_code`.
    pub async fn insert_if_absent(
        pool: &PgPool,
        id: UserId,
        display_name: &str,
        friend_code: &str,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, display_name, friend_code)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .bind(display_name)
            .bind(friend_code)
            .fetch_optional(pool)
            .await
    }
}
