#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use platebook_core::dining::{Dish, Place, Ratings, UserProfile};
use platebook_core::normalize::canonical_city_key;
use platebook_core::types::{DbId, UserId};
use platebook_db::store::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use platebook_api::config::{ServerConfig, StoreBackend};
use platebook_api::router::build_app_router;
use platebook_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        db_max_connections: 1,
    }
}

/// Build the full application router over `store`, with the same
/// middleware stack as the binary.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_app_router(AppState::new(store, test_config()))
}

pub fn user(n: u128) -> UserId {
    Uuid::from_u128(n)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    caller: Option<UserId>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = caller {
        builder = builder.header("x-user-id", id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, caller: UserId) -> Response<Body> {
    send(app, Method::GET, uri, Some(caller), None).await
}

pub async fn post_json(app: Router, uri: &str, caller: UserId, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(caller), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, caller: UserId, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(caller), Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, caller: UserId, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(caller), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, caller: UserId) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(caller), None).await
}

/// Read the response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub async fn seed_user(store: &MemoryStore, id: UserId, name: &str) {
    store
        .insert_user(UserProfile {
            id,
            display_name: name.to_string(),
            friend_code: format!("F{}", &id.simple().to_string()[..7]),
            friends: Vec::new(),
            avatar_url: None,
        })
        .await;
}

pub async fn seed_place(store: &MemoryStore, id: DbId, name: &str, city: &str) {
    store
        .insert_place(Place {
            id,
            name: name.to_string(),
            city: city.to_string(),
            city_key: canonical_city_key(city),
            maps_url: None,
            created_by: user(1),
            visited_by: vec![user(1)],
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap(),
        })
        .await;
}

/// A seeded dish; `month` is in `year`, other ratings are fixed.
pub struct SeedDish {
    pub id: DbId,
    pub place_id: DbId,
    pub author: UserId,
    pub name: &'static str,
    pub dish_type: &'static str,
    pub taste: i32,
    pub portion: i32,
    pub price: Option<f64>,
    pub year: i32,
    pub month: u32,
}

pub async fn seed_dish(store: &MemoryStore, seed: SeedDish) {
    store
        .insert_dish(Dish {
            id: seed.id,
            place_id: seed.place_id,
            user_id: seed.author,
            author_name: "snapshot".to_string(),
            dish_name: seed.name.to_string(),
            dish_type: seed.dish_type.to_string(),
            ratings: Ratings {
                taste: seed.taste,
                portion: seed.portion,
                service: 3,
                ambience: 3,
                queue: 0,
                price: seed.price,
            },
            notes: None,
            photos: Vec::new(),
            created_at: Utc
                .with_ymd_and_hms(seed.year, seed.month, 10, 12, seed.id as u32 % 60, 0)
                .unwrap(),
        })
        .await;
}
