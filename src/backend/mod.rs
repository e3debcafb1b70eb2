//! Backend Module
//!
//! This module contains all server-side code for the ClassHub application.
//! It provides an Axum HTTP server exposing account, authentication, and
//! profile endpoints backed by PostgreSQL.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Accounts, JWT tokens, password hashing, reset flow
//! - **`profiles`** - Student/teacher role profiles and enrollment
//! - **`email`** - Outbound mail dispatch (password-reset notifications)
//! - **`middleware`** - Bearer-token authentication middleware
//! - **`error`** - Backend-specific error types
//!
//! # State Management
//!
//! The backend uses shared state (`AppState`) containing the optional
//! database pool and the optional SMTP mailer. Both are `Option`s so the
//! server can start (and answer health/validation requests) without a
//! fully configured environment; handlers answer 503 when the database is
//! missing.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, ApiError>`. Every domain failure (bad input,
//! duplicate email, bad credentials, invalid reset token) is mapped to a
//! structured JSON error response at the handler boundary; nothing panics
//! past it.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Accounts, sessions, and the password-reset flow
pub mod auth;

/// Student/teacher role profiles and enrollment
pub mod profiles;

/// Outbound email dispatch
pub mod email;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::ApiError;
pub use server::state::AppState;
