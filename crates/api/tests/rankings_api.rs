//! HTTP-level integration tests for `/rankings` and `/filters`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, seed_dish, seed_place, seed_user, user, SeedDish};
use platebook_db::store::MemoryStore;
use serde_json::{json, Value};

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, user(1), "Ala").await;
    seed_user(&store, user(2), "Bartek").await;
    // user(3) has no profile.

    seed_place(&store, 1, "Napoli", "Gdansk").await;
    seed_place(&store, 2, "Roma", "Gdańsk").await;
    seed_place(&store, 3, "Wawel", "Kraków").await;

    let dishes = [
        (5, 3, 1, "Shoyu", "ramen", 5, 3, Some(25.0), 2023),
        (1, 1, 1, "Margherita", "pizza", 8, 4, Some(20.0), 2024),
        (2, 1, 1, "Hawaii", "pizza", 6, 2, None, 2024),
        (3, 2, 2, "Diavola", "pizza", 9, 5, Some(40.0), 2024),
        (4, 3, 3, "Tonkotsu", "ramen", 9, 3, Some(0.0), 2024),
    ];
    for (id, place_id, author, name, dish_type, taste, portion, price, year) in dishes {
        seed_dish(
            &store,
            SeedDish {
                id,
                place_id,
                author: user(author),
                name,
                dish_type,
                taste,
                portion,
                price,
                year,
                month: 6,
            },
        )
        .await;
    }
    store
}

async fn rankings(query: &str) -> Value {
    let app = build_test_app(seeded_store().await);
    let response = get(app, &format!("/api/v1/rankings{query}"), user(1)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

fn labels(rows: &Value) -> Vec<&str> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|r| r["label"].as_str().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Test: category rankings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn category_filter_ranks_places_by_average_taste() {
    let data = rankings("?year=all&category=Pizza").await;

    assert_eq!(labels(&data["top_places_in_category"]), vec!["Roma", "Napoli"]);
    let napoli = &data["top_places_in_category"][1];
    assert_eq!(napoli["score"], 7.0);
    assert_eq!(napoli["count"], 2);
    assert_eq!(napoli["right"], "7.00 / 10");
    assert_eq!(napoli["extra"], "2 dishes");
    assert_eq!(napoli["subject"], json!({ "kind": "place", "id": 1 }));

    assert_eq!(
        labels(&data["top_dishes"]),
        vec!["Diavola", "Margherita", "Hawaii"]
    );
    assert_eq!(data["top_dishes"][2]["extra"], "—");
    assert_eq!(data["category"], "Pizza");
}

#[tokio::test]
async fn value_for_money_skips_unknown_and_zero_prices() {
    let data = rankings("?year=all").await;

    let rows = data["value_for_money"].as_array().unwrap();
    assert_eq!(labels(&data["value_for_money"]), vec!["Napoli", "Roma", "Wawel"]);
    // Napoli: (8 + 4) / 20, the unpriced Hawaii does not count.
    assert_eq!(rows[0]["count"], 1);
    assert_eq!(rows[0]["right"], "0.600");
    // Wawel: only the 2023 Shoyu, (5 + 3) / 25; the free Tonkotsu is left out.
    assert_eq!(rows[2]["count"], 1);
    assert_eq!(rows[2]["right"], "0.320");
}

#[tokio::test]
async fn equal_taste_prefers_cheaper_dish_and_free_is_shown() {
    let data = rankings("?year=all").await;

    assert_eq!(data["top_dishes"][0]["label"], "Tonkotsu");
    assert_eq!(data["top_dishes"][0]["extra"], "0,00\u{a0}zł");
    assert_eq!(data["top_dishes"][1]["label"], "Diavola");
    assert_eq!(data["top_dishes"][1]["sub"], "Roma • Gdańsk • pizza");
}

#[tokio::test]
async fn top_places_is_empty_without_category() {
    let data = rankings("?year=all").await;

    assert_eq!(data["top_places_in_category"], json!([]));
}

// ---------------------------------------------------------------------------
// Test: authors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn authors_are_labelled_from_profiles_with_short_id_fallback() {
    let data = rankings("?year=all").await;

    let authors = &data["top_authors"];
    let expected_fallback: String = user(3).to_string().chars().take(6).collect();
    assert_eq!(
        labels(authors),
        vec!["Ala", "Bartek", expected_fallback.as_str()]
    );
    assert_eq!(authors[0]["count"], 3);
    assert_eq!(authors[0]["right"], "3 dishes");
    assert_eq!(
        authors[0]["subject"],
        json!({ "kind": "author", "id": user(1).to_string() })
    );
}

// ---------------------------------------------------------------------------
// Test: year and city filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn year_and_city_filters_combine() {
    let data = rankings("?year=2024&city=GDA%C5%83SK").await;

    assert_eq!(data["selected_year"], 2024);
    assert_eq!(
        labels(&data["top_dishes"]),
        vec!["Diavola", "Margherita", "Hawaii"]
    );
    assert_eq!(labels(&data["top_authors"]), vec!["Ala", "Bartek"]);
    assert_eq!(data["years"], json!([2024, 2023]));
}

#[tokio::test]
async fn year_without_data_yields_empty_lists() {
    let data = rankings("?year=1999").await;

    assert_eq!(data["top_dishes"], json!([]));
    assert_eq!(data["value_for_money"], json!([]));
    assert_eq!(data["top_authors"], json!([]));
    assert_eq!(data["years"], json!([2024, 2023]));
}

#[tokio::test]
async fn missing_year_defaults_to_all_when_current_year_has_no_data() {
    let data = rankings("").await;

    assert!(data["selected_year"].is_null());
    assert_eq!(data["top_dishes"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn invalid_year_is_rejected() {
    let app = build_test_app(seeded_store().await);

    let response = get(app, "/api/v1/rankings?year=soon", user(1)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_store_yields_empty_rankings() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let data = body_json(get(app, "/api/v1/rankings", user(1)).await).await;

    assert_eq!(data["data"]["top_dishes"], json!([]));
    assert_eq!(data["data"]["years"], json!([]));
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filters_list_one_spelling_per_city_and_sorted_categories() {
    let app = build_test_app(seeded_store().await);

    let data = body_json(get(app, "/api/v1/filters", user(1)).await).await;

    assert_eq!(data["data"]["cities"], json!(["Gdansk", "Kraków"]));
    assert_eq!(data["data"]["dish_types"], json!(["pizza", "ramen"]));
}
