//! Dish model.

use platebook_core::dining::{Dish, Ratings};
use platebook_core::normalize::normalize_dish_type;
use platebook_core::types::{DbId, Timestamp, UserId};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `dishes` table. Ratings are stored as flat columns.
#[derive(Debug, Clone, FromRow)]
pub struct DishRow {
    pub id: DbId,
    pub place_id: DbId,
    pub user_id: UserId,
    pub author_name: String,
    pub dish_name: String,
    pub dish_type: String,
    pub taste: i32,
    pub portion: i32,
    pub service: i32,
    pub ambience: i32,
    pub queue_minutes: i32,
    pub price: Option<f64>,
    pub notes: Option<String>,
    pub photos: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<DishRow> for Dish {
    fn from(row: DishRow) -> Self {
        Dish {
            id: row.id,
            place_id: row.place_id,
            user_id: row.user_id,
            author_name: row.author_name,
            dish_name: row.dish_name,
            dish_type: row.dish_type,
            ratings: Ratings {
                taste: row.taste,
                portion: row.portion,
                service: row.service,
                ambience: row.ambience,
                queue: row.queue_minutes,
                price: row.price,
            },
            notes: row.notes,
            photos: row.photos,
            created_at: row.created_at,
        }
    }
}

/// DTO for logging a dish at a place.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDish {
    pub dish_name: String,
    pub dish_type: String,
    pub ratings: Ratings,
    pub notes: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl CreateDish {
    /// Copy with the name trimmed, the category normalized and blank notes
    /// dropped.
    pub fn normalized(&self) -> Self {
        Self {
            dish_name: self.dish_name.trim().to_string(),
            dish_type: normalize_dish_type(&self.dish_type),
            ratings: self.ratings,
            notes: normalize_notes(self.notes.as_deref()),
            photos: self.photos.clone(),
        }
    }
}

/// DTO for editing a dish. Absent fields are left unchanged; blank `notes`
/// clears the notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDish {
    pub dish_name: Option<String>,
    pub dish_type: Option<String>,
    pub ratings: Option<Ratings>,
    pub notes: Option<String>,
    pub photos: Option<Vec<String>>,
}

impl UpdateDish {
    pub fn normalized(&self) -> Self {
        Self {
            dish_name: self.dish_name.as_deref().map(|n| n.trim().to_string()),
            dish_type: self.dish_type.as_deref().map(normalize_dish_type),
            ratings: self.ratings,
            notes: self.notes.as_deref().map(|n| n.trim().to_string()),
            photos: self.photos.clone(),
        }
    }

    /// Apply a normalized update to an in-memory dish.
    pub fn apply_to(&self, dish: &mut Dish) {
        if let Some(name) = &self.dish_name {
            dish.dish_name = name.clone();
        }
        if let Some(dish_type) = &self.dish_type {
            dish.dish_type = dish_type.clone();
        }
        if let Some(ratings) = self.ratings {
            dish.ratings = ratings;
        }
        if let Some(notes) = &self.notes {
            dish.notes = normalize_notes(Some(notes));
        }
        if let Some(photos) = &self.photos {
            dish.photos = photos.clone();
        }
    }
}

fn normalize_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
