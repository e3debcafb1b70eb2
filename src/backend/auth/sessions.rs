/**
 * Session Management and JWT Tokens
 *
 * This module handles issuance and validation of the stateless bearer token
 * pair. Each authenticated session receives a short-lived access token and a
 * longer-lived refresh token; both are self-contained HS256 JWTs bound to one
 * account at issuance time. Nothing is stored server-side, so validity is
 * purely signature + expiry, and logout is a client-side token discard.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Marker for tokens that authorize requests
pub const TOKEN_TYPE_ACCESS: &str = "access";
/// Marker for tokens that can only mint new pairs
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

const DEFAULT_ACCESS_TTL_SECS: u64 = 60 * 60;
const DEFAULT_REFRESH_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// "access" or "refresh"; each is refused where the other is expected
    pub token_type: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Access/refresh token pair issued on signup, login, and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived token proving identity per request
    pub access: String,
    /// Long-lived token used to mint new pairs
    pub refresh: String,
}

/// Get JWT secret from environment
fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|err| {
        eprintln!("Missing JWT_SECRET. Error: {}", err);
        "your-secret-key-change-in-production".to_string()
    })
}

fn ttl_from_env(var: &str, default_secs: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_secs)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn make_token(
    user_id: Uuid,
    email: &str,
    token_type: &str,
    iat: u64,
    exp: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        token_type: token_type.to_string(),
        exp,
        iat,
    };

    let secret = get_jwt_secret();
    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Create an access/refresh token pair for a user
///
/// Access TTL defaults to one hour (`ACCESS_TOKEN_TTL_SECS`), refresh TTL to
/// 30 days (`REFRESH_TOKEN_TTL_SECS`).
pub fn create_token_pair(
    user_id: Uuid,
    email: &str,
) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    let now = unix_now();
    let access_ttl = ttl_from_env("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TTL_SECS);
    let refresh_ttl = ttl_from_env("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TTL_SECS);

    Ok(TokenPair {
        access: make_token(user_id, email, TOKEN_TYPE_ACCESS, now, now + access_ttl)?,
        refresh: make_token(user_id, email, TOKEN_TYPE_REFRESH, now, now + refresh_ttl)?,
    })
}

fn verify_token(
    token: &str,
    expected_type: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_jwt_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    if token_data.claims.token_type != expected_type {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    Ok(token_data.claims)
}

/// Verify and decode an access token
///
/// Signature + expiry check only; there is no revocation list.
pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    verify_token(token, TOKEN_TYPE_ACCESS)
}

/// Verify and decode a refresh token
pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    verify_token(token, TOKEN_TYPE_REFRESH)
}

/// Extract the user ID from a verified access token
pub fn get_user_id_from_token(token: &str) -> Result<Uuid, String> {
    let claims =
        verify_access_token(token).map_err(|e| format!("Token verification failed: {}", e))?;
    Uuid::parse_str(&claims.sub).map_err(|e| format!("Invalid user ID in token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_token_pair() {
        let user_id = Uuid::new_v4();
        let pair = create_token_pair(user_id, "test@example.com").unwrap();
        assert!(!pair.access.is_empty());
        assert!(!pair.refresh.is_empty());
        assert_ne!(pair.access, pair.refresh);
    }

    #[test]
    fn test_verify_access_token() {
        let user_id = Uuid::new_v4();
        let pair = create_token_pair(user_id, "test@example.com").unwrap();

        let claims = verify_access_token(&pair.access).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_refused_as_access() {
        let pair = create_token_pair(Uuid::new_v4(), "test@example.com").unwrap();
        assert!(verify_access_token(&pair.refresh).is_err());
        assert!(verify_refresh_token(&pair.refresh).is_ok());
    }

    #[test]
    fn test_access_token_refused_as_refresh() {
        let pair = create_token_pair(Uuid::new_v4(), "test@example.com").unwrap();
        assert!(verify_refresh_token(&pair.access).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let user_id = Uuid::new_v4();
        let now = unix_now();
        // Issued two hours ago, expired one hour ago. Validation's default
        // leeway is 60 seconds, well inside the hour.
        let token =
            make_token(user_id, "test@example.com", TOKEN_TYPE_ACCESS, now - 7200, now - 3600)
                .unwrap();
        assert!(verify_access_token(&token).is_err());
    }

    #[test]
    fn test_verify_invalid_token() {
        assert!(verify_access_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_get_user_id_from_token() {
        let user_id = Uuid::new_v4();
        let pair = create_token_pair(user_id, "test@example.com").unwrap();
        assert_eq!(get_user_id_from_token(&pair.access).unwrap(), user_id);
    }
}
