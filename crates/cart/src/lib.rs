//! Vinayak Cart - Client-side shopping cart.
//!
//! The cart lives entirely on the customer's device. It holds product
//! snapshots with quantities, keeps the running total and item count in
//! lockstep with the line items, and writes itself to durable storage after
//! every change so a returning visitor finds their cart intact.
//!
//! Persistence is injected through the [`CartStorage`] trait, so the store
//! can run against a real file in the app and against plain memory in tests.
//! A missing or corrupt saved cart is never fatal: [`CartStore::open`] falls
//! back to the empty cart.
//!
//! # Modules
//!
//! - [`item`] - Product snapshots and cart line items
//! - [`state`] - The cart state (items plus derived totals)
//! - [`storage`] - The persistence trait and its file/memory backends
//! - [`store`] - The mutation API over the state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod item;
pub mod state;
pub mod storage;
pub mod store;

pub use item::{CartItem, ProductSnapshot};
pub use state::CartState;
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
