//! Authentication service.
//!
//! Password signup and login for the two account kinds. Customer and owner
//! accounts live in separate tables and never mix, so the same email can
//! hold one of each.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use vinayak_core::Email;

use crate::db::{OwnerAccountRepository, RepositoryError, UserAccountRepository};
use crate::models::{OwnerAccount, UserAccount};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles signup and login against whatever repositories the app state
/// carries, so the same code path serves Postgres and the in-memory store.
pub struct AuthService<'a> {
    users: &'a dyn UserAccountRepository,
    owners: &'a dyn OwnerAccountRepository,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        users: &'a dyn UserAccountRepository,
        owners: &'a dyn OwnerAccountRepository,
    ) -> Self {
        Self { users, owners }
    }

    // =========================================================================
    // Customer Accounts
    // =========================================================================

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Result<UserAccount, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let account = self
            .users
            .create(name, &email, phone, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(account)
    }

    /// Login to a customer account with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login_user(&self, email: &str, password: &str) -> Result<UserAccount, AuthError> {
        let email = Email::parse(email)?;

        let (account, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(account)
    }

    // =========================================================================
    // Owner Accounts
    // =========================================================================

    /// Register a new shop owner account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register_owner(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        business_name: &str,
        password: &str,
    ) -> Result<OwnerAccount, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let account = self
            .owners
            .create(name, &email, phone, business_name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(account)
    }

    /// Login to an owner account with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login_owner(
        &self,
        email: &str,
        password: &str,
    ) -> Result<OwnerAccount, AuthError> {
        let email = Email::parse(email)?;

        let (account, password_hash) = self
            .owners
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(account)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{MemoryOwnerAccountRepository, MemoryUserAccountRepository};

    #[tokio::test]
    async fn test_register_then_login() {
        let users = MemoryUserAccountRepository::default();
        let owners = MemoryOwnerAccountRepository::default();
        let auth = AuthService::new(&users, &owners);

        let created = auth
            .register_user("Ravi Sharma", "ravi@example.com", "9822012345", "laddoo-vault-9")
            .await
            .unwrap();

        let logged_in = auth
            .login_user("Ravi@Example.com", "laddoo-vault-9")
            .await
            .unwrap();
        assert_eq!(logged_in.id, created.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let users = MemoryUserAccountRepository::default();
        let owners = MemoryOwnerAccountRepository::default();
        let auth = AuthService::new(&users, &owners);

        auth.register_user("Ravi Sharma", "ravi@example.com", "9822012345", "laddoo-vault-9")
            .await
            .unwrap();

        let err = auth
            .login_user("ravi@example.com", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let users = MemoryUserAccountRepository::default();
        let owners = MemoryOwnerAccountRepository::default();
        let auth = AuthService::new(&users, &owners);

        let err = auth
            .login_user("nobody@example.com", "whatever-this-is")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let users = MemoryUserAccountRepository::default();
        let owners = MemoryOwnerAccountRepository::default();
        let auth = AuthService::new(&users, &owners);

        auth.register_user("Ravi Sharma", "ravi@example.com", "9822012345", "laddoo-vault-9")
            .await
            .unwrap();

        let err = auth
            .register_user("Other Ravi", "ravi@example.com", "9822099999", "another-pass-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let users = MemoryUserAccountRepository::default();
        let owners = MemoryOwnerAccountRepository::default();
        let auth = AuthService::new(&users, &owners);

        let err = auth
            .register_user("Ravi Sharma", "ravi@example.com", "9822012345", "short")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[tokio::test]
    async fn test_owner_and_user_tables_are_separate() {
        let users = MemoryUserAccountRepository::default();
        let owners = MemoryOwnerAccountRepository::default();
        let auth = AuthService::new(&users, &owners);

        auth.register_owner(
            "Vinayak Joshi",
            "owner@vinayaksweets.in",
            "9822012345",
            "Vinayak Sweets",
            "gulab-jamun-55",
        )
        .await
        .unwrap();

        // The owner email is not a customer login.
        let err = auth
            .login_user("owner@vinayaksweets.in", "gulab-jamun-55")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        auth.login_owner("owner@vinayaksweets.in", "gulab-jamun-55")
            .await
            .unwrap();
    }
}
