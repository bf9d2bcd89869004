//! Cart state: line items plus derived totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::CartItem;

/// The whole cart as held in memory and written to storage.
///
/// `total` and `item_count` are folds of `items`. They are stored rather
/// than computed on demand so the persisted form matches what the customer
/// last saw, but every mutation path recomputes them together with the item
/// change; nothing updates one without the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Line items in insertion order (which is display order).
    pub items: Vec<CartItem>,
    /// Sum of `price * quantity` over all items, in rupees.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Sum of quantities over all items.
    pub item_count: u64,
}

impl CartState {
    /// The empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Re-derive `total` and `item_count` from the current items.
    pub fn recompute_totals(&mut self) {
        self.total = self.items.iter().map(CartItem::line_total).sum();
        self.item_count = self.items.iter().map(|i| u64::from(i.quantity)).sum();
    }
}
