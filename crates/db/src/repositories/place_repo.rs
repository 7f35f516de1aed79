//! Repository for the `places` table.

use platebook_core::normalize::canonical_city_key;
use platebook_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::place::{CreatePlace, PlaceRow};

/// Column list for places queries.
const COLUMNS: &str = "id, name, city, city_key, maps_url, created_by, visited_by, created_at";

/// Provides CRUD operations for places.
pub struct PlaceRepo;

impl PlaceRepo {
    /// Create a place; the creator is recorded as its first visitor.
    pub async fn create(
        pool: &PgPool,
        created_by: UserId,
        input: &CreatePlace,
    ) -> Result<PlaceRow, sqlx::Error> {
        let input = input.normalized();
        let query = format!(
            "INSERT INTO places (name, city, city_key, maps_url, created_by, visited_by)
             VALUES ($1, $2, $3, $4, $5, ARRAY[$5]::UUID[])
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlaceRow>(&query)
            .bind(&input.name)
            .bind(&input.city)
            .bind(input.city_key())
            .bind(&input.maps_url)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a place by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlaceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places WHERE id = $1");
        sqlx::query_as::<_, PlaceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List places in a city (matched on the canonical key), by name.
    pub async fn list_by_city(pool: &PgPool, city: &str) -> Result<Vec<PlaceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM places WHERE city_key = $1 ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, PlaceRow>(&query)
            .bind(canonical_city_key(city))
            .fetch_all(pool)
            .await
    }

    /// List every place.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PlaceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places ORDER BY id ASC");
        sqlx::query_as::<_, PlaceRow>(&query).fetch_all(pool).await
    }

    /// Distinct city names, one spelling per canonical key (the earliest
    /// one recorded), sorted by name.
    pub async fn list_cities(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT city FROM (
                 SELECT DISTINCT ON (city_key) city
                 FROM places
                 ORDER BY city_key, created_at ASC, id ASC
             ) AS cities
             ORDER BY city ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Replace the map link, returning the updated row.
    pub async fn update_maps_url(
        pool: &PgPool,
        id: DbId,
        maps_url: Option<&str>,
    ) -> Result<Option<PlaceRow>, sqlx::Error> {
        let query = format!("UPDATE places SET maps_url = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, PlaceRow>(&query)
            .bind(id)
            .bind(maps_url)
            .fetch_optional(pool)
            .await
    }

    /// Add a user to the visitor set (no-op if already present).
    pub async fn add_visitor(
        pool: &PgPool,
        id: DbId,
        user_id: UserId,
    ) -> Result<Option<PlaceRow>, sqlx::Error> {
        let query = format!(
            "UPDATE places SET visited_by = CASE
                 WHEN $2 = ANY(visited_by) THEN visited_by
                 ELSE array_append(visited_by, $2)
             END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlaceRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
