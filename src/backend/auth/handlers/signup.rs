/**
 * Signup Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate names, email shape, and the password pair
 * 2. Hash the password with bcrypt
 * 3. Create the account (unique index enforces one account per identity)
 * 4. Issue an access/refresh token pair
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 * - Duplicate detection rides on the database unique index, so two
 *   concurrent signups for the same email cannot both succeed
 */

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{validate_new_password, AuthResponse, SignupRequest};
use crate::backend::auth::sessions::create_token_pair;
use crate::backend::auth::users::{create_user, hash_password, NewUser};
use crate::backend::error::ApiError;

fn validate_signup(request: &SignupRequest) -> Result<(), ApiError> {
    if request.first_name.trim().is_empty() {
        return Err(ApiError::invalid_input("first_name", "First name is required"));
    }
    if request.last_name.trim().is_empty() {
        return Err(ApiError::invalid_input("last_name", "Last name is required"));
    }
    if !request.email.contains('@') {
        return Err(ApiError::invalid_input("email", "Invalid email format"));
    }
    validate_new_password(&request.password, &request.confirm_password)
}

/// Sign up handler
///
/// Validates the input, creates a new account, and returns a token pair for
/// immediate authentication.
///
/// # Errors
///
/// * `400 Bad Request` - missing field, bad email shape, or password
///   confirmation mismatch
/// * `409 Conflict` - an account with this email already exists
/// * `503 Service Unavailable` - database is not configured
pub async fn signup(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    tracing::info!("Signup request for email: {}", request.email);

    validate_signup(&request)?;

    let password_hash = hash_password(&request.password)?;

    let user = create_user(
        &pool,
        NewUser {
            email: request.email,
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
        },
    )
    .await?;

    let token = create_token_pair(user.id, &user.email).map_err(ApiError::internal)?;

    tracing::info!("User created successfully: {} ({})", user.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            message: "User created successfully".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request() -> SignupRequest {
        SignupRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "a@x.com".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
        }
    }

    #[test]
    fn test_validate_signup_ok() {
        assert!(validate_signup(&request()).is_ok());
    }

    #[test]
    fn test_validate_signup_missing_name() {
        let mut r = request();
        r.first_name = "  ".to_string();
        assert_matches!(
            validate_signup(&r),
            Err(ApiError::InvalidInput { field: "first_name", .. })
        );
    }

    #[test]
    fn test_validate_signup_bad_email() {
        let mut r = request();
        r.email = "not-an-email".to_string();
        assert_matches!(
            validate_signup(&r),
            Err(ApiError::InvalidInput { field: "email", .. })
        );
    }

    #[test]
    fn test_validate_signup_accepts_short_password() {
        // Matching confirmation is the only password rule at signup.
        let mut r = request();
        r.password = "p1".to_string();
        r.confirm_password = "p1".to_string();
        assert!(validate_signup(&r).is_ok());
    }

    #[test]
    fn test_validate_signup_password_mismatch() {
        let mut r = request();
        r.confirm_password = "password124".to_string();
        assert_matches!(validate_signup(&r), Err(ApiError::Mismatch));
    }
}
