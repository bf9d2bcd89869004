//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vinayak_core::{Category, OrderLineItem, ProductId};

/// The catalog fields a cart line copies when a product is added.
///
/// This is a snapshot: later catalog edits (a price change, a renamed
/// product) do not reach back into carts that already hold the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price in rupees at the time of adding.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub is_featured: bool,
}

/// One line of the cart: a product snapshot plus a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    pub quantity: u32,
}

impl CartItem {
    /// Start a new line with quantity 1.
    #[must_use]
    pub const fn new(product: ProductSnapshot) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Id of the product this line refers to.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.product_id
    }

    /// Line total (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    /// The canonical order line this cart line turns into at checkout.
    #[must_use]
    pub fn to_order_line(&self) -> OrderLineItem {
        OrderLineItem {
            product_id: self.product.product_id,
            name: self.product.name.clone(),
            price: self.product.price,
            quantity: self.quantity,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn snapshot(price: Decimal) -> ProductSnapshot {
        ProductSnapshot {
            product_id: ProductId::generate(),
            name: "Kaju Katli".to_owned(),
            description: None,
            price,
            image: None,
            category: Category::Sweets,
            is_featured: false,
        }
    }

    #[test]
    fn test_new_line_has_quantity_one() {
        let item = CartItem::new(snapshot(Decimal::new(25000, 2)));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_line_total_multiplies_exactly() {
        let mut item = CartItem::new(snapshot(Decimal::new(9950, 2)));
        item.quantity = 3;
        assert_eq!(item.line_total(), Decimal::new(29850, 2));
    }

    #[test]
    fn test_to_order_line_keeps_snapshot_fields() {
        let mut item = CartItem::new(snapshot(Decimal::new(18000, 2)));
        item.quantity = 2;
        let line = item.to_order_line();
        assert_eq!(line.product_id, item.product_id());
        assert_eq!(line.name, "Kaju Katli");
        assert_eq!(line.price, Decimal::new(18000, 2));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_serde_flattens_product_fields() {
        let item = CartItem::new(snapshot(Decimal::new(12000, 2)));
        let value = serde_json::to_value(&item).unwrap();
        // Snapshot fields sit next to quantity, not under a nested key.
        assert!(value.get("product").is_none());
        assert_eq!(value["name"], "Kaju Katli");
        assert_eq!(value["quantity"], 1);
    }
}
