//! HTTP middleware stack for the API server.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors, trace requests)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS (the storefront runs on a different origin in development)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)

pub mod auth;
pub mod session;

pub use auth::{
    RequireOwner, clear_current_owner, clear_current_user, set_current_owner, set_current_user,
};
pub use session::{create_memory_session_layer, create_session_layer};
