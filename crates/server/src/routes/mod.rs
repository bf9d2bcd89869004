//! HTTP route handlers for the API server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database ping)
//!
//! # Products
//! GET  /api/products            - Product listing
//! POST /api/products            - Add a product (owner only)
//!
//! # Orders
//! POST /api/orders              - Place an order (checkout)
//! GET  /api/orders/user-orders  - Order history lookup by email/phone
//! GET  /api/orders/recent       - Recent orders (owner only)
//! PUT  /api/orders/{id}/status  - Update order status (owner only)
//!
//! # Auth
//! POST /api/user/signup         - Customer signup
//! POST /api/user/login          - Customer login
//! POST /api/owner/signup        - Owner signup
//! POST /api/owner/login         - Owner login
//! POST /api/auth/logout         - Logout (clears both account kinds)
//! ```

pub mod auth;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/", get(products::list).post(products::create))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create))
        .route("/user-orders", get(orders::user_orders))
        .route("/recent", get(orders::recent))
        .route("/{id}/status", put(orders::update_status))
}

/// Create the auth routes router (customer signup/login, owner
/// signup/login, logout).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/user/signup", post(auth::user_signup))
        .route("/user/login", post(auth::user_login))
        .route("/owner/signup", post(auth::owner_signup))
        .route("/owner/login", post(auth::owner_login))
        .route("/auth/logout", post(auth::logout))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .nest("/api", auth_routes())
}
