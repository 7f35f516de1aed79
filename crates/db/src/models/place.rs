//! Place model.

use platebook_core::dining::Place;
use platebook_core::normalize::canonical_city_key;
use platebook_core::types::{DbId, Timestamp, UserId};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `places` table.
#[derive(Debug, Clone, FromRow)]
pub struct PlaceRow {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub city_key: String,
    pub maps_url: Option<String>,
    pub created_by: UserId,
    pub visited_by: Vec<UserId>,
    pub created_at: Timestamp,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Place {
            id: row.id,
            name: row.name,
            city: row.city,
            city_key: row.city_key,
            maps_url: row.maps_url,
            created_by: row.created_by,
            visited_by: row.visited_by,
            created_at: row.created_at,
        }
    }
}

/// DTO for creating a place.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlace {
    pub name: String,
    pub city: String,
    pub maps_url: Option<String>,
}

impl CreatePlace {
    /// Trimmed copy with blank map links dropped.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            maps_url: normalize_maps_url(self.maps_url.as_deref()),
        }
    }

    pub fn city_key(&self) -> String {
        canonical_city_key(&self.city)
    }
}

/// DTO for changing a place's map link. `None` or blank clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlaceMapsUrl {
    pub maps_url: Option<String>,
}

pub fn normalize_maps_url(url: Option<&str>) -> Option<String> {
    url.map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
}
