//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP
//! responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Taxonomy
//!
//! - `InvalidInput` - missing or malformed request fields (with field name)
//! - `DuplicateIdentity` - signup collision on the normalized email
//! - `AuthFailure` - bad credentials, generic by design
//! - `InvalidToken` - reset token bad, expired, or consumed
//! - `Mismatch` - password confirmation mismatch
//! - `NotFound` - account or profile lookup miss
//! - `Unavailable` / `Database` / `Internal` - infrastructure failures
//!
//! # HTTP Response Conversion
//!
//! All backend errors implement `IntoResponse` from Axum, allowing them to
//! be returned directly from handlers. The error is automatically converted
//! to an appropriate HTTP status code and JSON response body.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
