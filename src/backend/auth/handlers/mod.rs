//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for account and authentication
//! endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── signup.rs    - User registration handler
//! ├── login.rs     - User authentication handler
//! ├── session.rs   - Token validation, refresh, and logout
//! ├── me.rs        - Profile get/update handlers
//! └── password.rs  - Password change and reset flow handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: names + email + password pair → account created → token pair
//! 2. **Login**: email + password → credentials verified → token pair
//! 3. **Refresh**: refresh token → new token pair
//! 4. **Reset**: email → signed link mailed → confirm with new password
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Token pairs are stateless JWTs; logout is a client-side discard
//! - Login failures return a generic 401 with no enumeration detail
//! - Reset tokens are HMAC-signed over current account state and expire

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Token validation, refresh, and logout handlers
pub mod session;

/// Profile get/update handlers
pub mod me;

/// Password change and reset flow handlers
pub mod password;

// Re-export commonly used types
pub use types::{
    AuthResponse, LoginRequest, MessageResponse, PasswordChangeRequest, RefreshRequest,
    ResetRequest, SignupRequest, UpdateProfileRequest, UserResponse,
};

// Re-export handlers
pub use login::login;
pub use me::{get_me, update_me};
pub use password::{change_password, confirm_reset, request_reset};
pub use session::{logout, refresh, validate_token};
pub use signup::signup;
