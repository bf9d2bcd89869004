//! Shop owner account management.
//!
//! Owner accounts gate the dashboard routes (catalog writes, recent orders,
//! status updates). There is no signup page wired up for them in the
//! storefront, so the first account is created here.
//!
//! # Usage
//!
//! ```bash
//! VINAYAK_OWNER_PASSWORD=... vinayak-cli owner create \
//!     -e owner@vinayaksweets.in -n "Vinayak Joshi" \
//!     -b "Vinayak Sweets" -p 9822012345
//! ```
//!
//! # Environment Variables
//!
//! - `VINAYAK_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`, matching the server)
//! - `VINAYAK_OWNER_PASSWORD` - Password for the new account. An environment
//!   variable rather than a flag, so it stays out of shell history.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::info;

use vinayak_server::db::{self, PgOwnerAccountRepository, PgUserAccountRepository};
use vinayak_server::services::{AuthError, AuthService};

/// Errors that can occur during owner account operations.
#[derive(Debug, Error)]
pub enum OwnerError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Account creation failed.
    #[error("Account creation failed: {0}")]
    Auth(#[from] AuthError),
}

/// Create a new shop owner account.
///
/// Runs the same registration path as the API, so the password rules and
/// duplicate-email checks match what a signup request would get.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the email is
/// invalid or already registered, or the password is too weak.
pub async fn create(
    email: &str,
    name: &str,
    business: &str,
    phone: &str,
) -> Result<(), OwnerError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("VINAYAK_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| OwnerError::MissingEnvVar("VINAYAK_DATABASE_URL"))?;

    let password = std::env::var("VINAYAK_OWNER_PASSWORD")
        .map(SecretString::from)
        .map_err(|_| OwnerError::MissingEnvVar("VINAYAK_OWNER_PASSWORD"))?;

    info!("Connecting to shop database...");
    let pool = db::create_pool(&database_url).await?;

    let users = PgUserAccountRepository::new(pool.clone());
    let owners = PgOwnerAccountRepository::new(pool);
    let auth = AuthService::new(&users, &owners);

    info!("Creating owner account: {email}");
    let account = auth
        .register_owner(name, email, phone, business, password.expose_secret())
        .await?;

    info!("Owner account created successfully!");
    info!("  ID: {}", account.id);
    info!("  Email: {}", account.email);
    info!("  Business: {}", account.business_name);

    Ok(())
}
