//! User profile model.

use platebook_core::dining::UserProfile;
use platebook_core::types::{Timestamp, UserId};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: UserId,
    pub display_name: String,
    pub friend_code: String,
    pub friends: Vec<UserId>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        UserProfile {
            id: row.id,
            display_name: row.display_name,
            friend_code: row.friend_code,
            friends: row.friends,
            avatar_url: row.avatar_url,
        }
    }
}
