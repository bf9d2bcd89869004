//! Order types.
//!
//! An order captures the checkout form, the cart lines as they were priced at
//! the time of purchase, and a status that walks pending -> processing ->
//! completed (or cancelled). Line items are snapshots, so later catalog edits
//! never rewrite order history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vinayak_core::{OrderId, OrderLineItem, OrderStatus, PaymentMethod};

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order's database ID.
    pub id: OrderId,
    /// Customer name from the checkout form.
    #[serde(rename = "name")]
    pub customer_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderLineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// A validated order ready to be persisted.
///
/// Produced by checkout validation; the repository assigns the ID, the
/// initial status, and the creation timestamp.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderLineItem>,
    pub total: Decimal,
}

/// Trimmed order view returned by the customer order-history lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub items: Vec<OrderLineItem>,
    pub created_at: DateTime<Utc>,
}
