//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Password signup and login for customer and owner accounts
//! - `checkout` - Checkout payload validation and normalization

pub mod auth;
pub mod checkout;

pub use auth::{AuthError, AuthService};
pub use checkout::{CheckoutError, validate_checkout};
