//! Order routes: checkout intake, history lookup, and owner management.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use vinayak_core::{OrderId, OrderStatus};

use crate::db::RepositoryError;
use crate::error::{ApiError, Result, add_breadcrumb};
use crate::middleware::RequireOwner;
use crate::models::{Order, OrderSummary};
use crate::services::checkout::validate_checkout;
use crate::state::AppState;

/// How many orders the recent-orders endpoint returns by default.
const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Upper bound on the recent-orders limit.
const MAX_RECENT_LIMIT: i64 = 100;

/// Place an order.
///
/// POST /api/orders
///
/// Accepts the storefront checkout payload, including the legacy field
/// spellings, and responds with the stored order.
///
/// # Errors
///
/// Returns `ApiError::Checkout` when the payload is rejected.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse> {
    let new_order = validate_checkout(&payload)?;

    let method = new_order.payment_method.to_string();
    add_breadcrumb("checkout", "Order validated", Some(&[("payment_method", &method)]));

    let order = state.orders().create(new_order).await?;

    info!(order_id = %order.id, total = %order.total, "Order placed");

    Ok((StatusCode::CREATED, Json(order)))
}

/// Query parameters for the order history lookup.
#[derive(Debug, Deserialize)]
pub struct UserOrdersQuery {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Look up past orders by contact details.
///
/// GET /api/orders/user-orders?email=&phone=
///
/// Guests have no login, so history lookup goes by the email and/or phone
/// given at checkout. When both are present an order must match both.
///
/// # Errors
///
/// Returns `ApiError::BadRequest` when neither email nor phone is given.
pub async fn user_orders(
    State(state): State<AppState>,
    Query(query): Query<UserOrdersQuery>,
) -> Result<Json<Vec<OrderSummary>>> {
    let email = query.email.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let phone = query.phone.as_deref().map(str::trim).filter(|s| !s.is_empty());

    if email.is_none() && phone.is_none() {
        return Err(ApiError::BadRequest(
            "Email or phone number is required.".to_owned(),
        ));
    }

    let orders = state.orders().find_by_customer(email, phone).await?;
    Ok(Json(orders))
}

/// Query parameters for the recent-orders endpoint.
#[derive(Debug, Deserialize)]
pub struct RecentOrdersQuery {
    pub limit: Option<i64>,
}

/// List the most recent orders across all customers.
///
/// GET /api/orders/recent?limit=20
///
/// # Errors
///
/// Returns `ApiError::Database` if the query fails.
pub async fn recent(
    State(state): State<AppState>,
    RequireOwner(_owner): RequireOwner,
    Query(query): Query<RecentOrdersQuery>,
) -> Result<Json<Vec<Order>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);

    let orders = state.orders().find_recent(limit).await?;
    Ok(Json(orders))
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

/// Move an order to a new status.
///
/// PUT /api/orders/{id}/status
///
/// Transitions follow the order lifecycle; completed and cancelled orders
/// are frozen and respond with a conflict.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown order,
/// `ApiError::BadRequest` for an unknown status, and a conflict when the
/// lifecycle forbids the move.
pub async fn update_status(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Path(id): Path<OrderId>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    let next: OrderStatus = req
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ApiError::BadRequest("Invalid status".to_owned()))?;

    let order = state
        .orders()
        .update_status(id, next)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => ApiError::NotFound("Order not found".to_owned()),
            other => ApiError::Database(other),
        })?;

    info!(order_id = %order.id, status = %order.status, by = %owner.email, "Order status updated");

    Ok(Json(order))
}
