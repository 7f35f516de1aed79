//! Domain records for places, dishes and user profiles, plus the input
//! validators shared by the store and the HTTP layer.
//!
//! These are the decoded shapes the ranking engine consumes; the `db` crate
//! maps its rows into them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Rating bounds
// ---------------------------------------------------------------------------

/// Taste is scored 1..=10.
pub const MIN_TASTE: i32 = 1;
pub const MAX_TASTE: i32 = 10;

/// Portion, service and ambience are scored 1..=5.
pub const MIN_MINOR_RATING: i32 = 1;
pub const MAX_MINOR_RATING: i32 = 5;

/// Maximum length of names and cities, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Length of a generated friend code.
pub const FRIEND_CODE_LEN: usize = 8;

/// Friend code alphabet without look-alike characters (0/O, 1/I/L).
const FRIEND_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Multi-axis score attached to a dish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub taste: i32,
    pub portion: i32,
    pub service: i32,
    pub ambience: i32,
    /// Minutes spent queueing.
    #[serde(default)]
    pub queue: i32,
    /// Price in PLN. `None` means unknown, which is not the same as free.
    #[serde(default)]
    pub price: Option<f64>,
}

/// A venue a user has logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: DbId,
    pub name: String,
    pub city: String,
    /// Canonical form of `city`, see [`crate::normalize::canonical_city_key`].
    pub city_key: String,
    pub maps_url: Option<String>,
    pub created_by: UserId,
    pub visited_by: Vec<UserId>,
    pub created_at: Timestamp,
}

/// A single eating experience logged against a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DbId,
    pub place_id: DbId,
    pub user_id: UserId,
    /// Author display name at the time the dish was logged.
    pub author_name: String,
    pub dish_name: String,
    /// Always trimmed and lower-cased.
    pub dish_type: String,
    pub ratings: Ratings,
    pub notes: Option<String>,
    pub photos: Vec<String>,
    pub created_at: Timestamp,
}

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub friend_code: String,
    pub friends: Vec<UserId>,
    pub avatar_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate every axis of a rating.
pub fn validate_ratings(ratings: &Ratings) -> Result<(), String> {
    if !(MIN_TASTE..=MAX_TASTE).contains(&ratings.taste) {
        return Err(format!(
            "taste must be between {MIN_TASTE} and {MAX_TASTE}, got {}",
            ratings.taste
        ));
    }
    for (axis, value) in [
        ("portion", ratings.portion),
        ("service", ratings.service),
        ("ambience", ratings.ambience),
    ] {
        if !(MIN_MINOR_RATING..=MAX_MINOR_RATING).contains(&value) {
            return Err(format!(
                "{axis} must be between {MIN_MINOR_RATING} and {MAX_MINOR_RATING}, got {value}"
            ));
        }
    }
    if ratings.queue < 0 {
        return Err(format!("queue must not be negative, got {}", ratings.queue));
    }
    if let Some(price) = ratings.price {
        if !price.is_finite() || price < 0.0 {
            return Err(format!("price must be a non-negative amount, got {price}"));
        }
    }
    Ok(())
}

/// Validate a required, length-limited text field.
pub fn validate_required_text(field: &str, value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!("{field} must be at most {MAX_NAME_LEN} characters"));
    }
    Ok(())
}

/// Validate the fields of a new place.
pub fn validate_place_input(name: &str, city: &str) -> Result<(), String> {
    validate_required_text("name", name)?;
    validate_required_text("city", city)
}

/// Validate the descriptive fields of a dish.
pub fn validate_dish_input(dish_name: &str, dish_type: &str) -> Result<(), String> {
    validate_required_text("dish_name", dish_name)?;
    validate_required_text("dish_type", dish_type)
}

// ---------------------------------------------------------------------------
// Friend codes
// ---------------------------------------------------------------------------

/// Generate a random, human-shareable friend code.
pub fn generate_friend_code() -> String {
    let mut rng = rand::rng();
    (0..FRIEND_CODE_LEN)
        .map(|_| FRIEND_CODE_ALPHABET[rng.random_range(0..FRIEND_CODE_ALPHABET.len())] as char)
        .collect()
}
