//! HTTP-level integration tests for the `/places` endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, patch_json, post_json, seed_place, user};
use platebook_db::store::MemoryStore;
use serde_json::json;

async fn create_place(app: axum::Router, name: &str, city: &str) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/v1/places",
        user(1),
        json!({ "name": name, "city": city }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/places
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_place_records_caller_as_creator_and_visitor() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let place = create_place(app, "  Pierogarnia ", "Gdańsk").await;

    assert_eq!(place["name"], "Pierogarnia");
    assert_eq!(place["city"], "Gdańsk");
    assert_eq!(place["city_key"], "gdansk");
    assert_eq!(place["created_by"], user(1).to_string());
    assert_eq!(place["visited_by"], json!([user(1).to_string()]));
    assert!(place["maps_url"].is_null());
}

#[tokio::test]
async fn create_place_with_blank_city_is_rejected() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let response = post_json(
        app,
        "/api/v1/places",
        user(1),
        json!({ "name": "Bar", "city": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/places?city=
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_by_city_ignores_diacritics_and_case() {
    let store = Arc::new(MemoryStore::new());
    seed_place(&store, 1, "Zupa", "Gdansk").await;
    seed_place(&store, 2, "Amber", "Gdańsk").await;
    seed_place(&store, 3, "Wawel", "Kraków").await;
    let app = build_test_app(store);

    let response = get(app, "/api/v1/places?city=GDA%C5%83SK", user(1)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Amber", "Zupa"]);
}

#[tokio::test]
async fn list_without_city_returns_all_places_by_name() {
    let store = Arc::new(MemoryStore::new());
    seed_place(&store, 1, "Zupa", "Gdansk").await;
    seed_place(&store, 2, "Wawel", "Kraków").await;
    let app = build_test_app(store);

    let json = body_json(get(app, "/api/v1/places", user(1)).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Wawel", "Zupa"]);
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/places/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_place_returns_404() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let response = get(app, "/api/v1/places/99", user(1)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: PATCH /api/v1/places/{id}/maps-url
// ---------------------------------------------------------------------------

#[tokio::test]
async fn maps_url_can_be_set_and_cleared() {
    let store = Arc::new(MemoryStore::new());
    seed_place(&store, 1, "Zupa", "Gdansk").await;
    let app = build_test_app(store);

    let response = patch_json(
        app.clone(),
        "/api/v1/places/1/maps-url",
        user(2),
        json!({ "maps_url": " https://maps.example/zupa " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["maps_url"],
        "https://maps.example/zupa"
    );

    let response = patch_json(
        app,
        "/api/v1/places/1/maps-url",
        user(2),
        json!({ "maps_url": "" }),
    )
    .await;
    assert!(body_json(response).await["data"]["maps_url"].is_null());
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/places/{id}/visit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn visiting_twice_records_the_visitor_once() {
    let store = Arc::new(MemoryStore::new());
    seed_place(&store, 1, "Zupa", "Gdansk").await;
    let app = build_test_app(store);

    post_json(app.clone(), "/api/v1/places/1/visit", user(2), json!({})).await;
    let response = post_json(app, "/api/v1/places/1/visit", user(2), json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["visited_by"],
        json!([user(1).to_string(), user(2).to_string()])
    );
}

#[tokio::test]
async fn visiting_unknown_place_returns_404() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let response = post_json(app, "/api/v1/places/5/visit", user(2), json!({})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
