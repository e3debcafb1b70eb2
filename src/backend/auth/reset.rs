/**
 * Password Reset Proofs
 *
 * This module encodes and verifies the opaque `(uid_ref, token)` pair mailed
 * to a user who requested a password reset.
 *
 * # Token construction
 *
 * - `uid_ref` is a url-safe base64 encoding of the account UUID: reversible
 *   transport obfuscation, not encryption.
 * - `token` is `"<issued-at>-<mac>"`, where `mac` is a hex HMAC-SHA256 over
 *   `id | email | password_hash | issued-at`, keyed by `RESET_SECRET`.
 *
 * Because the stored password hash feeds the signature, a successful reset
 * (or any other password change) silently invalidates every proof issued
 * before it. Proofs are never persisted; they expire after
 * `RESET_TOKEN_TTL_SECS` (default one hour).
 *
 * # Failure policy
 *
 * Every decode or verification problem collapses to `InvalidToken`:
 * malformed base64, unknown account, bad timestamp, stale window, wrong
 * signature. A caller holding a bad proof learns nothing beyond "invalid
 * or expired".
 */

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_RESET_TTL_SECS: u64 = 60 * 60;
// Tolerated forward clock drift between issue and verify hosts.
const TIMESTAMP_LEEWAY_SECS: u64 = 60;

fn get_reset_secret() -> String {
    std::env::var("RESET_SECRET")
        .or_else(|_| std::env::var("JWT_SECRET"))
        .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string())
}

fn reset_ttl_secs() -> u64 {
    std::env::var("RESET_TOKEN_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RESET_TTL_SECS)
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// The fields of account state a proof signature is bound to.
///
/// Keep this in sync with the invalidation guarantee: anything listed here
/// changing makes outstanding proofs fail verification.
fn signature_input(user: &User, issued_at: u64) -> String {
    format!(
        "{}|{}|{}|{}",
        user.id, user.email, user.password_hash, issued_at
    )
}

fn sign_at(user: &User, issued_at: u64) -> Result<String, ApiError> {
    let secret = get_reset_secret();
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ApiError::internal(format!("HMAC key setup failed: {e}")))?;
    mac.update(signature_input(user, issued_at).as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Encode a reset proof for an account
///
/// Returns `(uid_ref, token)`. Both parts travel in the emailed link and
/// come back on the confirm request.
pub fn encode_reset_proof(user: &User) -> Result<(String, String), ApiError> {
    let issued_at = unix_now();
    let uid_ref = URL_SAFE_NO_PAD.encode(user.id.to_string().as_bytes());
    let token = format!("{}-{}", issued_at, sign_at(user, issued_at)?);
    Ok((uid_ref, token))
}

/// Decode a `uid_ref` back into the account UUID
pub fn decode_uid(uid_ref: &str) -> Result<Uuid, ApiError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(uid_ref)
        .map_err(|_| ApiError::InvalidToken)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| ApiError::InvalidToken)?;
    Uuid::parse_str(text).map_err(|_| ApiError::InvalidToken)
}

/// Verify a reset token against the current state of an account
///
/// Recomputes the expected signature from the account as it exists now;
/// any intervening password change makes this fail. The MAC comparison is
/// constant-time via `Mac::verify_slice`.
pub fn verify_reset_token(user: &User, token: &str) -> Result<(), ApiError> {
    let (ts_part, mac_part) = token.split_once('-').ok_or(ApiError::InvalidToken)?;
    let issued_at: u64 = ts_part.parse().map_err(|_| ApiError::InvalidToken)?;

    let now = unix_now();
    if issued_at > now + TIMESTAMP_LEEWAY_SECS {
        return Err(ApiError::InvalidToken);
    }
    if now.saturating_sub(issued_at) > reset_ttl_secs() {
        return Err(ApiError::InvalidToken);
    }

    let expected = hex::decode(mac_part).map_err(|_| ApiError::InvalidToken)?;
    let secret = get_reset_secret();
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| ApiError::InvalidToken)?;
    mac.update(signature_input(user, issued_at).as_bytes());
    mac.verify_slice(&expected).map_err(|_| ApiError::InvalidToken)
}

/// Decode a proof and verify it against the live account record
///
/// Fails closed with `InvalidToken` whether the encoding is malformed, the
/// account does not exist, or the signature does not match current state.
pub async fn decode_and_verify(
    pool: &PgPool,
    uid_ref: &str,
    token: &str,
) -> Result<User, ApiError> {
    let user_id = decode_uid(uid_ref)?;
    let user = get_user_by_id(pool, user_id)
        .await?
        .ok_or(ApiError::InvalidToken)?;
    verify_reset_token(&user, token)?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn make_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            active: true,
            admin: false,
            is_student: false,
            is_teacher: false,
            bio: String::new(),
            address: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_round_trip_verifies() {
        let user = make_user();
        let (uid_ref, token) = encode_reset_proof(&user).unwrap();

        assert_eq!(decode_uid(&uid_ref).unwrap(), user.id);
        assert!(verify_reset_token(&user, &token).is_ok());
    }

    #[test]
    fn test_password_change_invalidates_proof() {
        let mut user = make_user();
        let (_, token) = encode_reset_proof(&user).unwrap();

        user.password_hash = "$2b$12$somethingcompletelyelse".to_string();
        assert_matches!(
            verify_reset_token(&user, &token),
            Err(ApiError::InvalidToken)
        );
    }

    #[test]
    fn test_expired_proof_rejected() {
        let user = make_user();
        let stale = unix_now() - reset_ttl_secs() - 10;
        let token = format!("{}-{}", stale, sign_at(&user, stale).unwrap());
        assert_matches!(
            verify_reset_token(&user, &token),
            Err(ApiError::InvalidToken)
        );
    }

    #[test]
    fn test_future_timestamp_rejected() {
        let user = make_user();
        let future = unix_now() + 3600;
        let token = format!("{}-{}", future, sign_at(&user, future).unwrap());
        assert_matches!(
            verify_reset_token(&user, &token),
            Err(ApiError::InvalidToken)
        );
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let user = make_user();
        let (_, token) = encode_reset_proof(&user).unwrap();

        let mut tampered = token[..token.len() - 1].to_string();
        tampered.push(if token.ends_with('0') { '1' } else { '0' });
        assert_matches!(
            verify_reset_token(&user, &tampered),
            Err(ApiError::InvalidToken)
        );
    }

    #[test]
    fn test_proof_bound_to_account() {
        let user = make_user();
        let other = make_user();
        let (_, token) = encode_reset_proof(&user).unwrap();
        assert_matches!(
            verify_reset_token(&other, &token),
            Err(ApiError::InvalidToken)
        );
    }

    #[test]
    fn test_malformed_tokens_fail_closed() {
        let user = make_user();
        for bad in ["", "nodash", "-", "notanumber-abcdef", "123-nothex!"] {
            assert_matches!(
                verify_reset_token(&user, bad),
                Err(ApiError::InvalidToken),
                "token {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_malformed_uid_ref_fails_closed() {
        for bad in ["", "!!!!", "bm90LWEtdXVpZA"] {
            assert_matches!(decode_uid(bad), Err(ApiError::InvalidToken));
        }
    }
}
