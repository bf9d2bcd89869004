//! Product catalog routes.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::info;

use vinayak_core::Category;

use crate::error::{ApiError, Result};
use crate::middleware::RequireOwner;
use crate::models::NewProduct;
use crate::models::Product;
use crate::services::checkout::{is_falsy, lenient_decimal, optional_string};
use crate::state::AppState;

/// List the full catalog, newest first.
///
/// GET /api/products
///
/// # Errors
///
/// Returns `ApiError::Database` if the query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.products().list_all().await?;
    Ok(Json(products))
}

/// Add a product to the catalog.
///
/// POST /api/products
///
/// The owner panel posts loose JSON; name, price, and category are
/// required, the rest default. Price tolerates numeric strings the same
/// way checkout does.
///
/// # Errors
///
/// Returns `ApiError::BadRequest` when required fields are missing or the
/// category is unknown.
pub async fn create(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse> {
    let name = optional_string(payload.get("name"));
    let category = optional_string(payload.get("category"));
    let price = payload
        .get("price")
        .filter(|value| !is_falsy(value))
        .and_then(lenient_decimal)
        .filter(|price| *price > Decimal::ZERO);

    let (Some(name), Some(price), Some(category)) = (name, price, category) else {
        return Err(ApiError::BadRequest(
            "Name, price, and category are required.".to_owned(),
        ));
    };

    let category: Category = category
        .trim()
        .to_lowercase()
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid category".to_owned()))?;

    let product = state
        .products()
        .create(NewProduct {
            name,
            description: optional_string(payload.get("description")),
            price,
            image: optional_string(payload.get("image")),
            category,
            is_featured: payload
                .get("isFeatured")
                .and_then(Value::as_bool)
                .unwrap_or_default(),
        })
        .await?;

    info!(product_id = %product.id, name = %product.name, by = %owner.email, "Product added");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Product added successfully",
            "product": product,
        })),
    ))
}
