/**
 * Profile Handlers
 *
 * GET and PUT /api/auth/profile for the currently authenticated user.
 *
 * The email identity is read-only here; only the display and free-form
 * fields (names, bio, address) can change.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{UpdateProfileRequest, UserResponse};
use crate::backend::auth::users::{get_user_by_id, update_profile};
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `404 Not Found` - account deleted since the token was issued
/// * `503 Service Unavailable` - database is not configured
pub async fn get_me(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let user = get_user_by_id(&pool, auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Account"))?;

    Ok(Json(UserResponse::from(&user)))
}

/// Update current user profile handler
///
/// Partial update: absent fields keep their stored values. Returns the
/// refreshed profile.
pub async fn update_me(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let user = update_profile(
        &pool,
        auth.user_id,
        request.first_name.as_deref(),
        request.last_name.as_deref(),
        request.bio.as_deref(),
        request.address.as_deref(),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => ApiError::NotFound("Account"),
        other => ApiError::Database(other),
    })?;

    tracing::info!("Profile updated for user: {}", user.id);

    Ok(Json(UserResponse::from(&user)))
}
