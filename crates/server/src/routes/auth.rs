//! Authentication routes for customer and owner accounts.
//!
//! Signup and login are plain password auth; a successful login records
//! the account in the session so the owner gate can check it later. The
//! storefront reads the `message` field of every response verbatim.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::{error, info};

use crate::error::{ApiError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{
    clear_current_owner, clear_current_user, set_current_owner, set_current_user,
};
use crate::models::{CurrentOwner, CurrentUser};
use crate::services::AuthService;
use crate::state::AppState;

/// Register a customer account.
///
/// POST /api/user/signup
///
/// # Errors
///
/// Returns `ApiError::BadRequest` when a field is missing and
/// `ApiError::Auth` for validation and duplicate-email failures.
pub async fn user_signup(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse> {
    let [name, email, phone, password] =
        required_fields(&payload, ["name", "email", "phone", "password"])?;

    let auth = AuthService::new(state.users(), state.owners());
    let account = auth.register_user(name, email, phone, password).await?;

    info!(user_id = %account.id, "Customer account created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Signup successful!" })),
    ))
}

/// Login to a customer account.
///
/// POST /api/user/login
///
/// # Errors
///
/// Returns `ApiError::Auth` with a 401 for bad credentials.
pub async fn user_login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<Value>,
) -> Result<Json<Value>> {
    let [email, password] = required_fields(&payload, ["email", "password"])?;

    let auth = AuthService::new(state.users(), state.owners());
    let account = auth.login_user(email, password).await?;

    let current = CurrentUser {
        id: account.id,
        email: account.email.clone(),
    };
    set_current_user(&session, &current)
        .await
        .map_err(|e| ApiError::Internal(format!("session error: {e}")))?;

    set_sentry_user(&account.id, Some(account.email.as_str()));

    Ok(Json(json!({ "message": "Login successful!", "user": account })))
}

/// Register a shop owner account.
///
/// POST /api/owner/signup
///
/// # Errors
///
/// Returns `ApiError::BadRequest` when a field is missing and
/// `ApiError::Auth` for validation and duplicate-email failures.
pub async fn owner_signup(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse> {
    let [name, business_name, email, phone, password] = required_fields(
        &payload,
        ["name", "businessName", "email", "phone", "password"],
    )?;

    let auth = AuthService::new(state.users(), state.owners());
    let account = auth
        .register_owner(name, email, phone, business_name, password)
        .await?;

    info!(owner_id = %account.id, business = %account.business_name, "Owner account created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Signup successful!" })),
    ))
}

/// Login to an owner account.
///
/// POST /api/owner/login
///
/// # Errors
///
/// Returns `ApiError::Auth` with a 401 for bad credentials.
pub async fn owner_login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<Value>,
) -> Result<Json<Value>> {
    let [email, password] = required_fields(&payload, ["email", "password"])?;

    let auth = AuthService::new(state.users(), state.owners());
    let account = auth.login_owner(email, password).await?;

    let current = CurrentOwner {
        id: account.id,
        email: account.email.clone(),
    };
    set_current_owner(&session, &current)
        .await
        .map_err(|e| ApiError::Internal(format!("session error: {e}")))?;

    set_sentry_user(&account.id, Some(account.email.as_str()));

    Ok(Json(json!({ "message": "Login successful!", "user": account })))
}

/// Logout whichever account is logged in.
///
/// POST /api/auth/logout
pub async fn logout(session: Session) -> Json<Value> {
    if let Err(e) = clear_current_user(&session).await {
        error!("Failed to clear customer session: {e}");
    }
    if let Err(e) = clear_current_owner(&session).await {
        error!("Failed to clear owner session: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        error!("Failed to flush session: {e}");
    }

    clear_sentry_user();

    Json(json!({ "message": "Logged out" }))
}

/// Pull required non-empty string fields out of a signup/login payload.
///
/// The storefront treats empty strings the same as absent fields, so both
/// reject with the same message.
fn required_fields<'a, const N: usize>(
    payload: &'a Value,
    names: [&str; N],
) -> Result<[&'a str; N]> {
    let mut fields = [""; N];
    for (slot, name) in fields.iter_mut().zip(names) {
        *slot = payload
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Missing required fields".to_owned()))?;
    }
    Ok(fields)
}
