//! Canonical order line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A single line of an order, in canonical form.
///
/// This is the shape orders are stored and served in. Checkout payloads may
/// arrive with legacy field spellings (`_id` instead of `productId`); the
/// order validator normalizes them into this type before anything is
/// persisted, so every stored item carries exactly these four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    /// Catalog product this line refers to.
    pub product_id: ProductId,
    /// Product name as shown to the customer when they ordered.
    pub name: String,
    /// Unit price in rupees at the time of ordering.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Number of units. Always at least 1.
    pub quantity: u32,
}

impl OrderLineItem {
    /// Line total (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn rupees(whole: i64, paise: u32) -> Decimal {
        Decimal::new(whole * 100 + i64::from(paise), 2)
    }

    #[test]
    fn test_line_total() {
        let item = OrderLineItem {
            product_id: ProductId::generate(),
            name: "Kaju Katli".to_owned(),
            price: rupees(250, 50),
            quantity: 3,
        };
        assert_eq!(item.line_total(), rupees(751, 50));
    }

    #[test]
    fn test_wire_format_is_camel_case_with_numeric_price() {
        let item = OrderLineItem {
            product_id: ProductId::generate(),
            name: "Besan Ladoo".to_owned(),
            price: rupees(180, 0),
            quantity: 2,
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["productId"], serde_json::json!(item.product_id));
        assert_eq!(value["name"], "Besan Ladoo");
        assert!(value["price"].is_number());
        assert_eq!(value["price"].as_f64().unwrap(), 180.0);
        assert_eq!(value["quantity"], 2);
    }

    #[test]
    fn test_deserializes_integer_and_fractional_prices() {
        let id = ProductId::generate();
        let json = format!(
            r#"{{"productId":"{id}","name":"Mixture","price":95,"quantity":1}}"#
        );
        let item: OrderLineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item.price, rupees(95, 0));

        let json = format!(
            r#"{{"productId":"{id}","name":"Mixture","price":95.5,"quantity":1}}"#
        );
        let item: OrderLineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item.price, rupees(95, 50));
    }
}
