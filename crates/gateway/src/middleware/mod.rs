//! Middleware for session authentication.

mod auth;

pub use auth::{auth_middleware, require_permission, CurrentUser};
