//! Integration tests for the order API.
//!
//! Covers checkout intake (including the legacy payload spellings older
//! storefront builds still send), customer history lookup, and the owner's
//! recent-orders and status endpoints.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use vinayak_core::{OrderId, ProductId};
use vinayak_integration_tests::TestApp;

fn checkout_payload() -> Value {
    json!({
        "name": "Asha Patil",
        "email": "asha@example.com",
        "phone": "9822012345",
        "address": "12 MG Road, Pune",
        "city": "Pune",
        "state": "Maharashtra",
        "pincode": "411001",
        "paymentMethod": "upi",
        "items": [{
            "productId": ProductId::generate().to_string(),
            "name": "Kaju Katli",
            "price": 450.5,
            "quantity": 2,
        }],
        "total": 901.0,
    })
}

async fn place_order(app: &TestApp, payload: &Value) -> Value {
    let resp = app.post_json("/api/orders", payload).await;
    assert_eq!(
        resp.status,
        StatusCode::CREATED,
        "checkout failed: {}",
        resp.text()
    );
    resp.json()
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_place_order() {
    let app = TestApp::new();

    let order = place_order(&app, &checkout_payload()).await;

    assert!(order["id"].is_string());
    assert_eq!(order["name"], "Asha Patil");
    assert_eq!(order["paymentMethod"], "upi");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["total"], 901.0);
    assert_eq!(order["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn test_place_order_accepts_legacy_item_id() {
    let app = TestApp::new();
    let product_id = ProductId::generate().to_string();

    let mut payload = checkout_payload();
    payload["items"] = json!([{
        "_id": product_id,
        "name": "Kaju Katli",
        "price": "450.50",
        "quantity": "2",
    }]);

    let order = place_order(&app, &payload).await;

    // Normalized into the canonical item shape
    assert_eq!(order["items"][0]["productId"], product_id.as_str());
    assert_eq!(order["items"][0]["price"], 450.5);
    assert_eq!(order["items"][0]["quantity"], 2);
    assert!(order["items"][0].get("_id").is_none());
}

#[tokio::test]
async fn test_place_order_missing_fields() {
    let app = TestApp::new();

    let resp = app.post_json("/api/orders", &json!({})).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["message"], "Missing required fields");
}

#[tokio::test]
async fn test_place_order_invalid_payment_method() {
    let app = TestApp::new();

    let mut payload = checkout_payload();
    payload["paymentMethod"] = json!("bitcoin");

    let resp = app.post_json("/api/orders", &payload).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["message"], "Invalid payment method");
}

#[tokio::test]
async fn test_place_order_item_without_product_id() {
    let app = TestApp::new();

    let mut payload = checkout_payload();
    payload["items"] = json!([{"name": "Kaju Katli", "price": 450.5, "quantity": 2}]);

    let resp = app.post_json("/api/orders", &payload).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["message"], "Item 0 missing product id");
}

// ============================================================================
// Customer History
// ============================================================================

#[tokio::test]
async fn test_user_orders_requires_contact() {
    let app = TestApp::new();

    let resp = app.get("/api/orders/user-orders").await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["message"], "Email or phone number is required.");

    // Blank parameters count as missing
    let resp = app.get("/api/orders/user-orders?email=&phone=").await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["message"], "Email or phone number is required.");
}

#[tokio::test]
async fn test_user_orders_by_email() {
    let app = TestApp::new();

    place_order(&app, &checkout_payload()).await;
    place_order(&app, &checkout_payload()).await;

    let mut other = checkout_payload();
    other["email"] = json!("someone-else@example.com");
    other["phone"] = json!("9000000000");
    place_order(&app, &other).await;

    let resp = app
        .get("/api/orders/user-orders?email=asha@example.com")
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let history = resp.json();
    assert_eq!(history.as_array().unwrap().len(), 2);

    // Summaries carry totals and items, not the delivery details
    let summary = &history[0];
    assert!(summary["id"].is_string());
    assert_eq!(summary["total"], 901.0);
    assert!(summary["items"].is_array());
    assert!(summary.get("address").is_none());
    assert!(summary.get("name").is_none());
}

// ============================================================================
// Owner: Recent Orders
// ============================================================================

#[tokio::test]
async fn test_recent_requires_owner_session() {
    let app = TestApp::new();

    let resp = app.get("/api/orders/recent").await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_recent_orders_newest_first() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    for total in [100.0, 200.0, 300.0] {
        let mut payload = checkout_payload();
        payload["total"] = json!(total);
        place_order(&app, &payload).await;
    }

    let resp = app
        .get_with_cookie("/api/orders/recent?limit=2", &cookie)
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let recent = resp.json();
    assert_eq!(recent.as_array().unwrap().len(), 2);
    assert_eq!(recent[0]["total"], 300.0);
    assert_eq!(recent[1]["total"], 200.0);
    // The owner view is the full order, delivery details included
    assert_eq!(recent[0]["address"], "12 MG Road, Pune");
}

#[tokio::test]
async fn test_recent_clamps_limit() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    place_order(&app, &checkout_payload()).await;
    place_order(&app, &checkout_payload()).await;

    // limit below the floor is raised to one order
    let resp = app
        .get_with_cookie("/api/orders/recent?limit=0", &cookie)
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json().as_array().unwrap().len(), 1);
}

// ============================================================================
// Owner: Status Updates
// ============================================================================

#[tokio::test]
async fn test_update_status_requires_owner_session() {
    let app = TestApp::new();
    let order = place_order(&app, &checkout_payload()).await;
    let order_id = order["id"].as_str().unwrap();

    let resp = app
        .put_json(
            &format!("/api/orders/{order_id}/status"),
            &json!({"status": "processing"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_status_walks_lifecycle() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;
    let order = place_order(&app, &checkout_payload()).await;
    let order_id = order["id"].as_str().unwrap();

    for status in ["processing", "completed"] {
        let resp = app
            .put_json_with_cookie(
                &format!("/api/orders/{order_id}/status"),
                &json!({"status": status}),
                &cookie,
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.json()["status"], status);
    }
}

#[tokio::test]
async fn test_update_status_unknown_status() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;
    let order = place_order(&app, &checkout_payload()).await;
    let order_id = order["id"].as_str().unwrap();

    let resp = app
        .put_json_with_cookie(
            &format!("/api/orders/{order_id}/status"),
            &json!({"status": "shipped"}),
            &cookie,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["message"], "Invalid status");
}

#[tokio::test]
async fn test_update_status_unknown_order() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;

    let resp = app
        .put_json_with_cookie(
            &format!("/api/orders/{}/status", OrderId::generate()),
            &json!({"status": "processing"}),
            &cookie,
        )
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json()["message"], "Order not found");
}

#[tokio::test]
async fn test_update_status_frozen_order() {
    let app = TestApp::new();
    let cookie = app.owner_session().await;
    let order = place_order(&app, &checkout_payload()).await;
    let order_id = order["id"].as_str().unwrap();

    let resp = app
        .put_json_with_cookie(
            &format!("/api/orders/{order_id}/status"),
            &json!({"status": "cancelled"}),
            &cookie,
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let resp = app
        .put_json_with_cookie(
            &format!("/api/orders/{order_id}/status"),
            &json!({"status": "processing"}),
            &cookie,
        )
        .await;

    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(
        resp.json()["message"],
        "cannot move order from cancelled to processing"
    );
}
