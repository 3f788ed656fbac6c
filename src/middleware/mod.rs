//! Middleware del sistema
//!
//! Sesión y roles, CORS y rate limiting.

pub mod auth;
pub mod cors;
pub mod rate_limit;

pub use auth::{admin_only, require_session};
pub use cors::cors_layer;
pub use rate_limit::{login_rate_limit, RateLimitState};
