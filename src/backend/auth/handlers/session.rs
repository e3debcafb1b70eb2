/**
 * Session Handlers
 *
 * Token validation, refresh, and logout for
 * GET /api/auth/validate, POST /api/auth/refresh, POST /api/auth/logout.
 *
 * Tokens are stateless, so there is no server-side session record to tear
 * down: logout acknowledges the request and the client discards its pair.
 * There is deliberately no revocation list; an access token stays valid
 * until its expiry even after logout.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::{AuthResponse, MessageResponse, RefreshRequest};
use crate::backend::auth::sessions::{create_token_pair, verify_refresh_token};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;

/// Token validation handler
///
/// Reaching this handler at all means the auth middleware accepted the
/// bearer token, so it just acknowledges.
pub async fn validate_token(AuthUser(user): AuthUser) -> Json<MessageResponse> {
    tracing::debug!("Token validated for user: {}", user.user_id);
    Json(MessageResponse::new("Token is valid"))
}

/// Logout handler
///
/// Stateless acknowledgement; the client is expected to drop both tokens.
pub async fn logout(AuthUser(user): AuthUser) -> Json<MessageResponse> {
    tracing::info!("User logged out: {}", user.user_id);
    Json(MessageResponse::new("Logged out successfully"))
}

/// Token refresh handler
///
/// Exchanges a valid refresh token for a new access/refresh pair. The
/// account is re-checked against the database so a disabled account cannot
/// keep minting sessions for the rest of its refresh window.
///
/// # Errors
///
/// * `401 Unauthorized` - refresh token invalid, expired, of the wrong
///   type, or the account is gone/disabled
/// * `503 Service Unavailable` - database is not configured
pub async fn refresh(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let claims = verify_refresh_token(&request.refresh).map_err(|e| {
        tracing::warn!("Invalid refresh token: {:?}", e);
        ApiError::AuthFailure
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::AuthFailure)?;
    let user = get_user_by_id(&pool, user_id)
        .await?
        .filter(|u| u.active)
        .ok_or(ApiError::AuthFailure)?;

    let token = create_token_pair(user.id, &user.email).map_err(ApiError::internal)?;

    tracing::debug!("Token pair refreshed for user: {}", user.id);

    Ok(Json(AuthResponse {
        token,
        message: "Token refreshed".to_string(),
    }))
}
