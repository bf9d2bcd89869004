//! Order repository for database operations.
//!
//! Orders store their line items as a JSONB snapshot rather than joining to
//! the catalog, so an order survives product edits and deletions unchanged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use vinayak_core::{OrderId, OrderLineItem, OrderStatus, PaymentMethod};

use super::RepositoryError;
use crate::models::order::{NewOrder, Order, OrderSummary};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    customer_name: String,
    email: Option<String>,
    phone: Option<String>,
    address: String,
    city: Option<String>,
    state: Option<String>,
    pincode: Option<String>,
    payment_method: PaymentMethod,
    items: Json<Vec<OrderLineItem>>,
    total: Decimal,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            customer_name: row.customer_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            city: row.city,
            state: row.state,
            pincode: row.pincode,
            payment_method: row.payment_method,
            items: row.items.0,
            total: row.total,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for the trimmed order-history view.
#[derive(Debug, sqlx::FromRow)]
struct OrderSummaryRow {
    id: Uuid,
    total: Decimal,
    items: Json<Vec<OrderLineItem>>,
    created_at: DateTime<Utc>,
}

impl From<OrderSummaryRow> for OrderSummary {
    fn from(row: OrderSummaryRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            total: row.total,
            items: row.items.0,
            created_at: row.created_at,
        }
    }
}

const ORDER_COLUMNS: &str = "id, customer_name, email, phone, address, city, state, pincode, \
                             payment_method, items, total, status, created_at";

// =============================================================================
// Repository
// =============================================================================

/// Order access used by the order routes.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a validated order and return it with its ID, `pending` status,
    /// and creation timestamp filled in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    async fn create(&self, new: NewOrder) -> Result<Order, RepositoryError>;

    /// Find a customer's order history by email and/or phone, newest first.
    ///
    /// When both are given, both must match. Returns an empty list when
    /// neither is given; the route rejects that case before it gets here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_by_customer(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Vec<OrderSummary>, RepositoryError>;

    /// The most recently placed orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_recent(&self, limit: i64) -> Result<Vec<Order>, RepositoryError>;

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Conflict` if the transition is not allowed
    /// (completed and cancelled orders are frozen).
    async fn update_status(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, RepositoryError>;
}

/// `PostgreSQL`-backed order repository.
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            INSERT INTO shop.customer_order
                (id, customer_name, email, phone, address, city, state, pincode,
                 payment_method, items, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(OrderId::generate())
        .bind(&new.customer_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.address)
        .bind(&new.city)
        .bind(&new.state)
        .bind(&new.pincode)
        .bind(new.payment_method)
        .bind(Json(&new.items))
        .bind(new.total)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_customer(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        const SUMMARY_SELECT: &str =
            "SELECT id, total, items, created_at FROM shop.customer_order";

        let rows = match (email, phone) {
            (Some(email), Some(phone)) => {
                sqlx::query_as::<_, OrderSummaryRow>(&format!(
                    "{SUMMARY_SELECT} WHERE email = $1 AND phone = $2 ORDER BY created_at DESC"
                ))
                .bind(email)
                .bind(phone)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(email), None) => {
                sqlx::query_as::<_, OrderSummaryRow>(&format!(
                    "{SUMMARY_SELECT} WHERE email = $1 ORDER BY created_at DESC"
                ))
                .bind(email)
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(phone)) => {
                sqlx::query_as::<_, OrderSummaryRow>(&format!(
                    "{SUMMARY_SELECT} WHERE phone = $1 ORDER BY created_at DESC"
                ))
                .bind(phone)
                .fetch_all(&self.pool)
                .await?
            }
            (None, None) => return Ok(Vec::new()),
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_recent(&self, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            SELECT {ORDER_COLUMNS}
            FROM shop.customer_order
            ORDER BY created_at DESC
            LIMIT $1
            "
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_status(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so concurrent status updates serialize
        let current: OrderStatus = sqlx::query_scalar::<_, OrderStatus>(
            "SELECT status FROM shop.customer_order WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if !current.can_transition_to(next) {
            return Err(RepositoryError::Conflict(format!(
                "cannot move order from {current} to {next}"
            )));
        }

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            UPDATE shop.customer_order
            SET status = $1
            WHERE id = $2
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(next)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }
}
