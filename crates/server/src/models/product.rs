//! Catalog product types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vinayak_core::{Category, ProductId};

/// A product in the shop catalog.
///
/// Prices are in rupees and serialize as plain JSON numbers, matching what
/// the storefront expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product's database ID.
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URL, if one has been uploaded.
    #[serde(default)]
    pub image: Option<String>,
    pub category: Category,
    /// Whether the product is highlighted on the home page.
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// A product as submitted by the shop owner, before it has an ID.
///
/// Also the row format of the seed YAML consumed by the CLI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub is_featured: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_price_as_number() {
        let product = Product {
            id: ProductId::generate(),
            name: "Kaju Katli".to_string(),
            description: Some("Cashew fudge".to_string()),
            price: Decimal::new(45050, 2),
            image: None,
            category: Category::Sweets,
            is_featured: true,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["price"], serde_json::json!(450.5));
        assert_eq!(value["category"], serde_json::json!("sweets"));
        assert_eq!(value["isFeatured"], serde_json::json!(true));
    }

    #[test]
    fn test_new_product_defaults() {
        let new: NewProduct = serde_json::from_value(serde_json::json!({
            "name": "Bhakarwadi",
            "price": 120,
            "category": "namkeens"
        }))
        .unwrap();

        assert_eq!(new.name, "Bhakarwadi");
        assert!(new.description.is_none());
        assert!(new.image.is_none());
        assert!(!new.is_featured);
    }
}
