//! Checkout payload validation.
//!
//! The storefront posts the checkout form as loose JSON, and older builds of
//! it take liberties: numbers arrive as strings, the payment method arrives
//! capitalized, and the catalog id rides under `_id` instead of `productId`.
//! This module normalizes all of that into a [`NewOrder`] or rejects the
//! payload with a message the storefront shows to the customer as-is.
//!
//! Validation order matters for the messages: the top-level required fields
//! are checked as a group first, then the payment method, then each line
//! item in turn.

use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

use vinayak_core::{OrderLineItem, PaymentMethod, ProductId};

use crate::models::order::NewOrder;

/// Errors reported to the customer when a checkout payload is rejected.
///
/// The `Display` strings are the exact messages the storefront renders.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required top-level field is missing, empty, or unusable.
    #[error("Missing required fields")]
    MissingRequiredFields,

    /// The payment method is not one the shop accepts.
    #[error("Invalid payment method")]
    InvalidPaymentMethod,

    /// An item carries no product id under either `productId` or `_id`.
    #[error("Item {0} missing product id")]
    ItemMissingProductId(usize),

    /// An item's product id is not a valid id.
    #[error("Item {0} has invalid product id")]
    ItemInvalidProductId(usize),

    /// An item's name, price, or quantity is missing or unusable.
    #[error("Item {0} is missing name, price, or quantity")]
    ItemMissingFields(usize),
}

/// Validate a raw checkout payload into a [`NewOrder`].
///
/// The submitted total is stored as-is; it is not recomputed from the line
/// items, so an order records exactly what the customer saw at checkout.
///
/// # Errors
///
/// Returns a [`CheckoutError`] describing the first problem found, in
/// the order described in the module docs.
pub fn validate_checkout(payload: &Value) -> Result<NewOrder, CheckoutError> {
    let customer_name = required_string(payload.get("name"))?;
    let address = required_string(payload.get("address"))?;
    let payment_raw = required_string(payload.get("paymentMethod"))?;

    let item_values = payload
        .get("items")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or(CheckoutError::MissingRequiredFields)?;

    let total = payload
        .get("total")
        .filter(|value| !is_falsy(value))
        .and_then(lenient_decimal)
        .filter(|total| *total > Decimal::ZERO)
        .ok_or(CheckoutError::MissingRequiredFields)?;

    let payment_method = payment_raw
        .trim()
        .to_lowercase()
        .parse::<PaymentMethod>()
        .map_err(|_| CheckoutError::InvalidPaymentMethod)?;

    let mut items = Vec::with_capacity(item_values.len());
    for (idx, item) in item_values.iter().enumerate() {
        items.push(validate_item(idx, item)?);
    }

    Ok(NewOrder {
        customer_name,
        email: optional_string(payload.get("email")),
        phone: optional_string(payload.get("phone")),
        address,
        city: optional_string(payload.get("city")),
        state: optional_string(payload.get("state")),
        pincode: optional_string(payload.get("pincode")),
        payment_method,
        items,
        total,
    })
}

/// Validate one cart line.
fn validate_item(idx: usize, item: &Value) -> Result<OrderLineItem, CheckoutError> {
    // Old storefront builds sent the catalog id as `_id`; fall back to it
    // when `productId` is absent or empty.
    let raw_id = [item.get("productId"), item.get("_id")]
        .into_iter()
        .flatten()
        .find(|value| !is_falsy(value))
        .ok_or(CheckoutError::ItemMissingProductId(idx))?;

    let product_id = raw_id
        .as_str()
        .and_then(|s| s.parse::<ProductId>().ok())
        .ok_or(CheckoutError::ItemInvalidProductId(idx))?;

    let name = item
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(CheckoutError::ItemMissingFields(idx))?;

    let price = item
        .get("price")
        .filter(|value| !is_falsy(value))
        .and_then(lenient_decimal)
        .filter(|price| *price > Decimal::ZERO)
        .ok_or(CheckoutError::ItemMissingFields(idx))?;

    let quantity = item
        .get("quantity")
        .filter(|value| !is_falsy(value))
        .and_then(lenient_quantity)
        .ok_or(CheckoutError::ItemMissingFields(idx))?;

    Ok(OrderLineItem {
        product_id,
        name: name.to_owned(),
        price,
        quantity,
    })
}

/// Whether a JSON value is "missing" the way the storefront means it:
/// absent, null, false, zero, or the empty string.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// A required non-empty string field.
fn required_string(value: Option<&Value>) -> Result<String, CheckoutError> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or(CheckoutError::MissingRequiredFields)
}

/// An optional string field; empty strings collapse to `None`.
pub(crate) fn optional_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Read a price or total that may arrive as a JSON number or a numeric
/// string.
pub(crate) fn lenient_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a quantity that may arrive as a JSON number or a numeric string.
/// Must be a whole number of at least 1.
fn lenient_quantity(value: &Value) -> Option<u32> {
    let qty = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !qty.is_finite() || qty.fract() != 0.0 || qty < 1.0 || qty > f64::from(u32::MAX) {
        return None;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // range-checked above
    Some(qty as u32)
}
