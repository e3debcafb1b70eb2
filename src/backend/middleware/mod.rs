//! Middleware Module
//!
//! Request-processing middleware for the backend. Currently this is the
//! bearer-token authentication layer applied to protected routes.

/// Bearer-token authentication middleware and extractor
pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
