//! Domain models for the shop server.

pub mod account;
pub mod order;
pub mod product;
pub mod session;

pub use account::{OwnerAccount, UserAccount};
pub use order::{NewOrder, Order, OrderSummary};
pub use product::{NewProduct, Product};
pub use session::{CurrentOwner, CurrentUser, keys as session_keys};
