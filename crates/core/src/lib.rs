//! Vinayak Core - Shared domain types.
//!
//! This crate provides common types used across all Vinayak Sweets components:
//! - `cart` - Client-side cart store
//! - `server` - Storefront JSON API (products, orders, auth)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, plus the
//!   category, payment-method and order-status enums and the canonical
//!   order line item

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
