/**
 * Password Handlers
 *
 * The three password-changing entry points:
 *
 * - POST /api/auth/password/change - in-session change, requires a valid
 *   bearer token
 * - POST /api/auth/password/reset - step one: look up the account and mail
 *   a reset link carrying the encoded proof
 * - POST /api/auth/password/reset/confirm/{uid}/{token} - step two: verify
 *   the proof and apply the new password
 *
 * The confirmation is the single mutating step: one UPDATE replaces the
 * hash, and because reset-proof signatures are bound to the stored hash,
 * that same UPDATE consumes every outstanding proof for the account.
 *
 * Mail dispatch is fire-and-forget: the HTTP response does not wait for
 * SMTP, and delivery failures are logged rather than surfaced.
 *
 * NOTE: the reset-request path reports whether an email is registered.
 * That matches the behavior existing clients depend on, but it is an
 * account-enumeration vector and is flagged for hardening.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{
    validate_new_password, MessageResponse, PasswordChangeRequest, ResetRequest,
};
use crate::backend::auth::reset::{decode_and_verify, encode_reset_proof};
use crate::backend::auth::users::{get_user_by_email, hash_password, update_password_hash};
use crate::backend::email::render_reset_email;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Store-error mapping for the reset confirmation
///
/// The account can disappear between proof verification and the `UPDATE`;
/// that race fails closed as `InvalidToken`, like every other bad-proof
/// outcome, rather than surfacing a 500.
fn reset_store_error(err: sqlx::Error) -> ApiError {
    match err {
        sqlx::Error::RowNotFound => ApiError::InvalidToken,
        other => ApiError::Database(other),
    }
}

fn reset_link_base() -> String {
    std::env::var("RESET_LINK_BASE")
        .unwrap_or_else(|_| "http://localhost:3000/reset-password-email".to_string())
}

/// In-session password change handler
///
/// Requires an authenticated session instead of a reset proof; the same
/// mismatch check applies. Outstanding reset proofs are invalidated as a
/// side effect of replacing the hash.
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<PasswordChangeRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = state.db_pool.ok_or(ApiError::Unavailable)?;

    validate_new_password(&request.password, &request.confirm_password)?;

    let password_hash = hash_password(&request.password)?;
    update_password_hash(&pool, auth.user_id, &password_hash)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::NotFound("Account"),
            other => ApiError::Database(other),
        })?;

    tracing::info!("Password changed for user: {}", auth.user_id);

    Ok(Json(MessageResponse::new("Password reset successfully")))
}

/// Password reset request handler
///
/// Looks up the account by normalized email, encodes a reset proof, and
/// dispatches the emailed link. Exactly one notification goes out per
/// successful call.
///
/// # Errors
///
/// * `400 Bad Request` - no account with this email (existence-revealing,
///   see module note)
/// * `503 Service Unavailable` - database is not configured
pub async fn request_reset(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = state.db_pool.ok_or(ApiError::Unavailable)?;
    tracing::info!("Password reset requested for: {}", request.email);

    let user = get_user_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| {
            ApiError::invalid_input("email", "User with this email does not exist")
        })?;

    let (uid_ref, token) = encode_reset_proof(&user)?;
    let link = format!("{}/{}/{}", reset_link_base(), uid_ref, token);
    tracing::debug!("Password reset link for {}: {}", user.id, link);

    let (subject, body) = render_reset_email(&user, &link);
    let recipient = user.email.clone();

    match state.mailer {
        Some(mailer) => {
            // Fire-and-forget: don't block the response on SMTP.
            tokio::spawn(async move {
                if let Err(e) = mailer.send(&subject, &body, &recipient).await {
                    tracing::error!("Failed to send reset email to {}: {}", recipient, e);
                }
            });
        }
        None => {
            tracing::warn!(
                "SMTP not configured; reset email for {} not sent",
                recipient
            );
        }
    }

    Ok(Json(MessageResponse::new(
        "Password reset email sent successfully",
    )))
}

/// Password reset confirmation handler
///
/// The mismatch check runs before any token work, so a bad confirmation
/// never touches the store. Verification failures of any kind collapse to
/// a generic `InvalidToken`.
pub async fn confirm_reset(
    State(state): State<AppState>,
    Path((uid_ref, token)): Path<(String, String)>,
    Json(request): Json<PasswordChangeRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = state.db_pool.ok_or(ApiError::Unavailable)?;

    validate_new_password(&request.password, &request.confirm_password)?;

    let user = decode_and_verify(&pool, &uid_ref, &token).await?;

    let password_hash = hash_password(&request.password)?;
    update_password_hash(&pool, user.id, &password_hash)
        .await
        .map_err(reset_store_error)?;

    tracing::info!("Password reset completed for user: {}", user.id);

    Ok(Json(MessageResponse::new("Password reset successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_vanished_account_fails_closed() {
        // A verified proof whose account is gone by UPDATE time reports the
        // same generic InvalidToken as any other bad proof.
        assert_matches!(
            reset_store_error(sqlx::Error::RowNotFound),
            ApiError::InvalidToken
        );
    }

    #[test]
    fn test_other_store_errors_stay_database() {
        assert_matches!(
            reset_store_error(sqlx::Error::PoolClosed),
            ApiError::Database(_)
        );
    }
}
