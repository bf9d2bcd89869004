//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::db::{
    MemoryOrderRepository, MemoryOwnerAccountRepository, MemoryProductRepository,
    MemoryUserAccountRepository, OrderRepository, OwnerAccountRepository, PgOrderRepository,
    PgOwnerAccountRepository, PgProductRepository, PgUserAccountRepository, ProductRepository,
    UserAccountRepository,
};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: configuration, the connection pool, and the
/// repositories every route reads through.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: Option<PgPool>,
    products: Arc<dyn ProductRepository>,
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserAccountRepository>,
    owners: Arc<dyn OwnerAccountRepository>,
}

impl AppState {
    /// Create application state backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(config: ServerConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products: Arc::new(PgProductRepository::new(pool.clone())),
                orders: Arc::new(PgOrderRepository::new(pool.clone())),
                users: Arc::new(PgUserAccountRepository::new(pool.clone())),
                owners: Arc::new(PgOwnerAccountRepository::new(pool.clone())),
                pool: Some(pool),
            }),
        }
    }

    /// Create application state backed by in-memory stores.
    ///
    /// Used by tests and by local runs without a database. Nothing stored
    /// through this state survives a restart.
    #[must_use]
    pub fn in_memory(config: ServerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool: None,
                products: Arc::new(MemoryProductRepository::default()),
                orders: Arc::new(MemoryOrderRepository::default()),
                users: Arc::new(MemoryUserAccountRepository::default()),
                owners: Arc::new(MemoryOwnerAccountRepository::default()),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the database connection pool, if this state is Postgres-backed.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Get the product repository.
    #[must_use]
    pub fn products(&self) -> &dyn ProductRepository {
        self.inner.products.as_ref()
    }

    /// Get the order repository.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderRepository {
        self.inner.orders.as_ref()
    }

    /// Get the customer account repository.
    #[must_use]
    pub fn users(&self) -> &dyn UserAccountRepository {
        self.inner.users.as_ref()
    }

    /// Get the owner account repository.
    #[must_use]
    pub fn owners(&self) -> &dyn OwnerAccountRepository {
        self.inner.owners.as_ref()
    }
}
