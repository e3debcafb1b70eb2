/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/auth/login.
 *
 * # Security
 *
 * - Passwords are verified with bcrypt (constant-time comparison)
 * - A missing account, a disabled account, and a wrong password all return
 *   the same generic 401, so the endpoint cannot be used to enumerate
 *   registered emails
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::create_token_pair;
use crate::backend::auth::users::verify_credentials;
use crate::backend::error::ApiError;

/// Login handler
///
/// Verifies the email and password and returns a fresh access/refresh token
/// pair when authentication succeeds.
///
/// # Errors
///
/// * `401 Unauthorized` - account not found, disabled, or wrong password
/// * `503 Service Unavailable` - database is not configured
pub async fn login(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    tracing::info!("Login request for: {}", request.username);

    let user = verify_credentials(&pool, &request.username, &request.password).await?;

    let token = create_token_pair(user.id, &user.email).map_err(ApiError::internal)?;

    tracing::info!("User logged in successfully: {} ({})", user.id, user.email);

    Ok(Json(AuthResponse {
        token,
        message: "Login successful".to_string(),
    }))
}
