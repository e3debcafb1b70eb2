/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication
 * handlers, plus the password validation shared by signup, in-session
 * change, and reset confirmation.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::sessions::TokenPair;
use crate::backend::auth::users::User;
use crate::backend::error::ApiError;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address (becomes the account identity, normalized)
    pub email: String,
    /// Password (hashed before storage)
    pub password: String,
    /// Password confirmation; must match `password`
    pub confirm_password: String,
}

/// Login request
///
/// The field is called `username` for wire compatibility with existing
/// clients, but it carries the account email.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// Account email
    pub username: String,
    /// Password (verified against the stored hash)
    pub password: String,
}

/// Token refresh request
#[derive(Deserialize, Serialize, Debug)]
pub struct RefreshRequest {
    /// A still-valid refresh token
    pub refresh: String,
}

/// Password reset request (step one of the reset flow)
#[derive(Deserialize, Serialize, Debug)]
pub struct ResetRequest {
    /// Email of the account to reset
    pub email: String,
}

/// New password payload, used by the in-session change and the reset
/// confirmation
#[derive(Deserialize, Serialize, Debug)]
pub struct PasswordChangeRequest {
    /// New password
    pub password: String,
    /// New password confirmation; must match `password`
    pub confirm_password: String,
}

/// Profile update request; `None` fields are left unchanged
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub address: Option<String>,
}

/// Auth response
///
/// Returned by signup, login, and refresh. Contains the token pair and a
/// status message.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    /// Access/refresh token pair
    pub token: TokenPair,
    /// Human-readable status message
    pub message: String,
}

/// Plain acknowledgement response
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User response (without sensitive data)
///
/// Contains account information that is safe to return to clients. Never
/// includes the password hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: String,
    /// User's email address
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_student: bool,
    pub is_teacher: bool,
    pub bio: String,
    pub address: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_student: user.is_student,
            is_teacher: user.is_teacher,
            bio: user.bio.clone(),
            address: user.address.clone(),
        }
    }
}

/// Validate a new password against its confirmation
///
/// Mismatch is the only rule: no length or complexity requirement is
/// imposed, and the check runs before hashing so a bad confirmation never
/// reaches the store.
pub fn validate_new_password(password: &str, confirm_password: &str) -> Result<(), ApiError> {
    if password != confirm_password {
        return Err(ApiError::Mismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_validate_new_password_mismatch() {
        assert_matches!(
            validate_new_password("password123", "password124"),
            Err(ApiError::Mismatch)
        );
    }

    #[test]
    fn test_validate_new_password_ok() {
        assert!(validate_new_password("password123", "password123").is_ok());
    }

    #[test]
    fn test_short_password_accepted() {
        // Only the confirmation must match; there is no minimum length.
        assert!(validate_new_password("p1", "p1").is_ok());
    }
}
