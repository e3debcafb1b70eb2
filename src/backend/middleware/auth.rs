/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require a
 * valid bearer access token. It extracts and verifies the JWT from the
 * Authorization header and attaches the authenticated user to the request.
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::sessions::verify_access_token;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT from the Authorization header
/// 2. Verifies signature, expiry, and token type (access only)
/// 3. Confirms the account still exists and is active
/// 4. Attaches `AuthenticatedUser` to request extensions for handlers
///
/// Returns 401 if the token is missing, invalid, of refresh type, or the
/// account is gone or disabled.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::AuthFailure
        })?;

    // Expected format: "Bearer <token>"
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        ApiError::AuthFailure
    })?;

    let claims = verify_access_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        ApiError::AuthFailure
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::error!("Invalid user ID in token: {:?}", e);
        ApiError::AuthFailure
    })?;

    if let Some(pool) = &app_state.db_pool {
        if let Err(e) = verify_user_active(pool, user_id).await {
            tracing::warn!("Account check failed for {}: {:?}", user_id, e);
            return Err(ApiError::AuthFailure);
        }
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Verify the account behind a token still exists and is active
async fn verify_user_active(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    use crate::backend::auth::users::get_user_by_id;

    get_user_by_id(pool, user_id)
        .await?
        .filter(|u| u.active)
        .ok_or(sqlx::Error::RowNotFound)?;

    Ok(())
}

/// Axum extractor for the authenticated user
///
/// Used as a handler parameter on routes behind `auth_middleware` to pull
/// the `AuthenticatedUser` out of the request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::AuthFailure
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use crate::backend::server::state::AppState;

    #[tokio::test]
    async fn test_auth_user_extractor_present() {
        let mut request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();

        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
        };
        request.extensions_mut().insert(user.clone());

        let (mut parts, _) = request.into_parts();
        let state = AppState::empty();
        let extracted = AuthUser::from_request_parts(&mut parts, &state).await;
        assert!(extracted.is_ok());
        assert_eq!(extracted.unwrap().0.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_auth_user_extractor_missing() {
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();

        let (mut parts, _) = request.into_parts();
        let state = AppState::empty();
        let extracted = AuthUser::from_request_parts(&mut parts, &state).await;
        assert!(extracted.is_err());
    }
}
