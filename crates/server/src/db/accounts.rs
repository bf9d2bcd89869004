//! Account repositories for customers and the shop owner.
//!
//! Password hashes never leave this layer except through
//! `get_password_hash`, which the auth service uses for verification.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use vinayak_core::{Email, OwnerId, UserId};

use super::RepositoryError;
use crate::models::account::{OwnerAccount, UserAccount};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` customer account queries.
#[derive(Debug, sqlx::FromRow)]
struct UserAccountRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserAccountRow> for (UserAccount, String) {
    type Error = RepositoryError;

    fn try_from(row: UserAccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok((
            UserAccount {
                id: UserId::new(row.id),
                name: row.name,
                email,
                phone: row.phone,
                created_at: row.created_at,
            },
            row.password_hash,
        ))
    }
}

/// Internal row type for `PostgreSQL` owner account queries.
#[derive(Debug, sqlx::FromRow)]
struct OwnerAccountRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    business_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OwnerAccountRow> for (OwnerAccount, String) {
    type Error = RepositoryError;

    fn try_from(row: OwnerAccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok((
            OwnerAccount {
                id: OwnerId::new(row.id),
                name: row.name,
                email,
                phone: row.phone,
                business_name: row.business_name,
                created_at: row.created_at,
            },
            row.password_hash,
        ))
    }
}

// =============================================================================
// Repositories
// =============================================================================

/// Customer account access used by the auth service.
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    /// Create a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn create(
        &self,
        name: &str,
        email: &Email,
        phone: &str,
        password_hash: &str,
    ) -> Result<UserAccount, RepositoryError>;

    /// Look up an account and its password hash by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(UserAccount, String)>, RepositoryError>;
}

/// Owner account access used by the auth service and the owner CLI.
#[async_trait]
pub trait OwnerAccountRepository: Send + Sync {
    /// Create a new owner account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn create(
        &self,
        name: &str,
        email: &Email,
        phone: &str,
        business_name: &str,
        password_hash: &str,
    ) -> Result<OwnerAccount, RepositoryError>;

    /// Look up an account and its password hash by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(OwnerAccount, String)>, RepositoryError>;
}

/// `PostgreSQL`-backed customer account repository.
#[derive(Clone)]
pub struct PgUserAccountRepository {
    pool: PgPool,
}

impl PgUserAccountRepository {
    /// Create a new customer account repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserAccountRepository for PgUserAccountRepository {
    async fn create(
        &self,
        name: &str,
        email: &Email,
        phone: &str,
        password_hash: &str,
    ) -> Result<UserAccount, RepositoryError> {
        let row = sqlx::query_as::<_, UserAccountRow>(
            r"
            INSERT INTO shop.user_account (id, name, email, phone, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, password_hash, created_at
            ",
        )
        .bind(UserId::generate())
        .bind(name)
        .bind(email.as_str())
        .bind(phone)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        let (account, _hash): (UserAccount, String) = row.try_into()?;
        Ok(account)
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(UserAccount, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserAccountRow>(
            r"
            SELECT id, name, email, phone, password_hash, created_at
            FROM shop.user_account
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}

/// `PostgreSQL`-backed owner account repository.
#[derive(Clone)]
pub struct PgOwnerAccountRepository {
    pool: PgPool,
}

impl PgOwnerAccountRepository {
    /// Create a new owner account repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnerAccountRepository for PgOwnerAccountRepository {
    async fn create(
        &self,
        name: &str,
        email: &Email,
        phone: &str,
        business_name: &str,
        password_hash: &str,
    ) -> Result<OwnerAccount, RepositoryError> {
        let row = sqlx::query_as::<_, OwnerAccountRow>(
            r"
            INSERT INTO shop.owner_account (id, name, email, phone, business_name, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, phone, business_name, password_hash, created_at
            ",
        )
        .bind(OwnerId::generate())
        .bind(name)
        .bind(email.as_str())
        .bind(phone)
        .bind(business_name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        let (account, _hash): (OwnerAccount, String) = row.try_into()?;
        Ok(account)
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(OwnerAccount, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, OwnerAccountRow>(
            r"
            SELECT id, name, email, phone, business_name, password_hash, created_at
            FROM shop.owner_account
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}
