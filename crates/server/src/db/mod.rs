//! Database operations for the shop `PostgreSQL`.
//!
//! # Schema: `shop`
//!
//! ## Tables
//!
//! - `shop.product` - Catalog (sweets, namkeens, festival specials)
//! - `shop.customer_order` - Placed orders with line-item snapshots (JSONB)
//! - `shop.user_account` - Customer accounts
//! - `shop.owner_account` - Shop owner accounts
//! - `tower_sessions.session` - Session storage
//!
//! Repositories are traits so the routes can run against `PostgreSQL` in
//! production and the in-memory implementations in tests.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p vinayak-cli -- migrate
//! ```

pub mod accounts;
pub mod memory;
pub mod orders;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use accounts::{
    OwnerAccountRepository, PgOwnerAccountRepository, PgUserAccountRepository,
    UserAccountRepository,
};
pub use memory::{
    MemoryOrderRepository, MemoryOwnerAccountRepository, MemoryProductRepository,
    MemoryUserAccountRepository,
};
pub use orders::{OrderRepository, PgOrderRepository};
pub use products::{PgProductRepository, ProductRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, frozen order status).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
