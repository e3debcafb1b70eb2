/**
 * Account Model and Credential Store
 *
 * This module handles account data and database operations, plus password
 * hashing and verification. Plaintext passwords never leave this module's
 * hashing functions and are never stored.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::ApiError;

/// User struct representing an account in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Normalized email address (unique, immutable after creation)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Soft-disable flag; inactive accounts cannot authenticate
    pub active: bool,
    /// Site administrator flag
    pub admin: bool,
    /// Account has a student role profile
    pub is_student: bool,
    /// Account has a teacher role profile
    pub is_teacher: bool,
    /// Free-form biography
    pub bio: String,
    /// Free-form address
    pub address: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// Normalize an email address into the canonical account identity
///
/// Trims surrounding whitespace and lowercases the whole address, so
/// case-variant signups collapse onto one identity.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash a plaintext password with bcrypt
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Verify a plaintext password against a stored bcrypt hash
///
/// bcrypt performs the comparison in constant time.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, password_hash)
}

/// Create a new account
///
/// The email is normalized before insertion. A collision on the unique
/// email index is reported as `DuplicateIdentity`.
pub async fn create_user(pool: &PgPool, new_user: NewUser) -> Result<User, ApiError> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let email = normalize_email(&new_user.email);

    let result = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, password_hash, first_name, last_name, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, email, password_hash, first_name, last_name, active, admin, is_student, is_teacher, bio, address, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&email)
    .bind(&new_user.password_hash)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => Ok(user),
        Err(e) if is_unique_violation(&e) => Err(ApiError::DuplicateIdentity),
        Err(e) => Err(ApiError::Database(e)),
    }
}

/// Get account by email
///
/// The email is normalized before lookup, so any case variant of a
/// registered address resolves to the same account.
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, first_name, last_name, active, admin, is_student, is_teacher, bio, address, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await
}

/// Get account by ID
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, first_name, last_name, active, admin, is_student, is_teacher, bio, address, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Verify login credentials
///
/// Looks up the account by normalized email and compares the password
/// against the stored hash. Returns the same `AuthFailure` whether the
/// account is missing, disabled, or the password is wrong.
pub async fn verify_credentials(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    let user = get_user_by_email(pool, email)
        .await?
        .ok_or(ApiError::AuthFailure)?;

    if !user.active {
        tracing::warn!("Login attempt for disabled account: {}", user.id);
        return Err(ApiError::AuthFailure);
    }

    let valid = verify_password(password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::AuthFailure);
    }

    Ok(user)
}

/// Replace the stored password hash
///
/// Single-statement UPDATE, so concurrent changes to the same account
/// serialize at the row level (last writer wins, no partial state).
/// Because reset-token signatures incorporate the stored hash, this also
/// invalidates every outstanding reset proof for the account.
pub async fn update_password_hash(
    pool: &PgPool,
    user_id: Uuid,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET password_hash = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, email, password_hash, first_name, last_name, active, admin, is_student, is_teacher, bio, address, created_at, updated_at
        "#,
    )
    .bind(password_hash)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Update the mutable profile fields
///
/// The email identity is immutable and deliberately not part of this
/// statement. `None` leaves a field unchanged.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    first_name: Option<&str>,
    last_name: Option<&str>,
    bio: Option<&str>,
    address: Option<&str>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET first_name = COALESCE($1, first_name),
            last_name = COALESCE($2, last_name),
            bio = COALESCE($3, bio),
            address = COALESCE($4, address),
            updated_at = $5
        WHERE id = $6
        RETURNING id, email, password_hash, first_name, last_name, active, admin, is_student, is_teacher, bio, address, created_at, updated_at
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(bio)
    .bind(address)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Set a role flag after the matching role profile is created
pub async fn set_role_flag(
    pool: &PgPool,
    user_id: Uuid,
    is_student: bool,
    is_teacher: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET is_student = is_student OR $1,
            is_teacher = is_teacher OR $2,
            updated_at = $3
        WHERE id = $4
        "#,
    )
    .bind(is_student)
    .bind(is_teacher)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error().and_then(|db| db.code()),
        Some(code) if code == "23505"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases_and_trims() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
        assert_eq!(normalize_email("user@example.com"), "user@example.com");
        assert_eq!(normalize_email("User@EXAMPLE.COM"), "user@example.com");
    }

    #[test]
    fn test_case_variants_collapse_to_one_identity() {
        assert_eq!(normalize_email("a@x.com"), normalize_email("A@X.COM"));
    }

    #[test]
    fn test_hash_password_never_stores_plaintext() {
        let hash = hash_password("p1").unwrap();
        assert_ne!(hash.as_bytes(), b"p1");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = hash_password("secret-password").unwrap();
        assert!(verify_password("secret-password", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }
}
