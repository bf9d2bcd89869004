//! Integration tests for the product catalog API.
//!
//! Catalog reads are public; catalog writes require an owner session.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use vinayak_integration_tests::TestApp;

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_starts_empty() {
    let app = TestApp::new();

    let resp = app.get("/api/products").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!([]));
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    for name in ["Kaju Katli", "Bhakarwadi"] {
        let resp = app
            .post_json_with_cookie(
                "/api/products",
                &json!({"name": name, "price": 200.0, "category": "sweets"}),
                &cookie,
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED);
    }

    let list = app.get("/api/products").await.json();
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["name"], "Bhakarwadi");
    assert_eq!(list[1]["name"], "Kaju Katli");
}

// ============================================================================
// Creation
// ============================================================================

#[tokio::test]
async fn test_create_requires_owner_session() {
    let app = TestApp::new();

    let resp = app
        .post_json(
            "/api/products",
            &json!({"name": "Kaju Katli", "price": 450.0, "category": "sweets"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json()["message"], "Unauthorized");
}

#[tokio::test]
async fn test_create_product() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    let resp = app
        .post_json_with_cookie(
            "/api/products",
            &json!({
                "name": "Kaju Katli",
                "description": "Cashew fudge finished with silver leaf.",
                "price": 450.5,
                "category": "sweets",
                "isFeatured": true,
            }),
            &cookie,
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let body = resp.json();
    assert_eq!(body["message"], "Product added successfully");

    let product = &body["product"];
    assert!(product["id"].is_string());
    assert_eq!(product["name"], "Kaju Katli");
    assert_eq!(product["price"], 450.5);
    assert_eq!(product["category"], "sweets");
    assert_eq!(product["isFeatured"], true);
}

#[tokio::test]
async fn test_create_missing_fields() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    let resp = app
        .post_json_with_cookie(
            "/api/products",
            &json!({"name": "Kaju Katli", "category": "sweets"}),
            &cookie,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json()["message"],
        "Name, price, and category are required."
    );
}

#[tokio::test]
async fn test_create_rejects_zero_price() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    let resp = app
        .post_json_with_cookie(
            "/api/products",
            &json!({"name": "Kaju Katli", "price": 0, "category": "sweets"}),
            &cookie,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json()["message"],
        "Name, price, and category are required."
    );
}

#[tokio::test]
async fn test_create_unknown_category() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    let resp = app
        .post_json_with_cookie(
            "/api/products",
            &json!({"name": "Cola", "price": 40.0, "category": "beverages"}),
            &cookie,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["message"], "Invalid category");
}

// ============================================================================
// Owner-panel Coercions
// ============================================================================

#[tokio::test]
async fn test_create_accepts_string_price() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    let resp = app
        .post_json_with_cookie(
            "/api/products",
            &json!({"name": "Chakli", "price": " 180.00 ", "category": "namkeens"}),
            &cookie,
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json()["product"]["price"], 180.0);
}

#[tokio::test]
async fn test_create_accepts_mixed_case_category() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    let resp = app
        .post_json_with_cookie(
            "/api/products",
            &json!({"name": "Gujiya", "price": 420.0, "category": "Festival"}),
            &cookie,
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json()["product"]["category"], "festival");
}

#[tokio::test]
async fn test_create_defaults_optional_fields() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    let resp = app
        .post_json_with_cookie(
            "/api/products",
            &json!({"name": "Rasgulla", "price": 260.0, "category": "sweets"}),
            &cookie,
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let product = resp.json()["product"].clone();
    assert_eq!(product["description"], json!(null));
    assert_eq!(product["image"], json!(null));
    assert_eq!(product["isFeatured"], false);
}
