//! Core types for Vinayak Sweets.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod line_item;
pub mod payment;
pub mod status;

pub use category::Category;
pub use email::{Email, EmailError};
pub use id::*;
pub use line_item::OrderLineItem;
pub use payment::PaymentMethod;
pub use status::OrderStatus;
