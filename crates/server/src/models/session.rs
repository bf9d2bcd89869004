//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use vinayak_core::{Email, OwnerId, UserId};

/// Session-stored customer identity.
///
/// Minimal data stored in the session to identify the logged-in customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
}

/// Session-stored owner identity.
///
/// Presence of this value in the session is what grants access to the
/// owner-only routes (catalog writes, order queue).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentOwner {
    /// Owner's database ID.
    pub id: OwnerId,
    /// Owner's email address.
    pub email: Email,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in customer.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the current logged-in shop owner.
    pub const CURRENT_OWNER: &str = "current_owner";
}
