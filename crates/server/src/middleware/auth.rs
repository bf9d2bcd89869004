//! Authentication middleware and extractors.
//!
//! Provides the owner-gate extractor for management routes and the session
//! helpers the auth routes use to record who is logged in.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::ApiError;
use crate::models::{CurrentOwner, CurrentUser, session_keys};

/// Extractor that requires a logged-in shop owner.
///
/// Rejects the request with `401 {"message": "Unauthorized"}` when no owner
/// session is present.
///
/// # Example
///
/// ```rust,ignore
/// async fn owner_handler(
///     RequireOwner(owner): RequireOwner,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", owner.email)
/// }
/// ```
pub struct RequireOwner(pub CurrentOwner);

impl<S> FromRequestParts<S> for RequireOwner
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_owned()))?;

        // Get the current owner from the session
        let owner: CurrentOwner = session
            .get(session_keys::CURRENT_OWNER)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_owned()))?;

        Ok(Self(owner))
    }
}

/// Helper to set the current customer in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current customer from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(session_keys::CURRENT_USER).await?;
    Ok(())
}

/// Helper to set the current owner in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_owner(
    session: &Session,
    owner: &CurrentOwner,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_OWNER, owner).await
}

/// Helper to clear the current owner from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_owner(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentOwner>(session_keys::CURRENT_OWNER).await?;
    Ok(())
}
