//! Authentication Module
//!
//! This module handles user accounts, authentication, and the password-reset
//! flow. It provides HTTP handlers for the auth endpoints and manages account
//! data, JWT token pairs, and signed reset proofs.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Account model, password hashing, database operations
//! ├── sessions.rs     - JWT access/refresh token management
//! ├── reset.rs        - Reset-proof encoding and verification
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT token pairs are used for stateless authentication
//! - Reset proofs are HMAC-signed over the stored password hash, so any
//!   password change invalidates them; they also carry an expiry window
//! - Invalid credentials return 401 with no information leakage

/// Account model, password hashing, and database operations
pub mod users;

/// JWT token pair generation and validation
pub mod sessions;

/// Password-reset proof encoding and verification
pub mod reset;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{
    change_password, confirm_reset, get_me, login, logout, refresh, request_reset, signup,
    update_me, validate_token,
};
pub use handlers::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use sessions::TokenPair;
pub use users::User;
