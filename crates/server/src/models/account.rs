//! Customer and shop-owner account types.
//!
//! Password hashes live only in the database layer; these types are safe to
//! serialize into login responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vinayak_core::{Email, OwnerId, UserId};

/// A registered customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// User's database ID.
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// The shop owner's account.
///
/// Owners can manage the catalog and work the order queue; customers cannot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerAccount {
    /// Owner's database ID.
    pub id: OwnerId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub business_name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_account_serializes_without_password() {
        let user = UserAccount {
            id: UserId::generate(),
            name: "Ravi".to_string(),
            email: Email::parse("ravi@example.com").unwrap(),
            phone: "9876543210".to_string(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["email"], serde_json::json!("ravi@example.com"));
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
    }

    #[test]
    fn test_owner_account_includes_business_name() {
        let owner = OwnerAccount {
            id: OwnerId::generate(),
            name: "Vinayak".to_string(),
            email: Email::parse("owner@vinayaksweets.in").unwrap(),
            phone: "9000000000".to_string(),
            business_name: "Vinayak Sweets".to_string(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&owner).unwrap();
        assert_eq!(value["businessName"], serde_json::json!("Vinayak Sweets"));
    }
}
