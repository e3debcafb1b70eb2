/**
 * Server Configuration
 *
 * This module handles loading of the optional external services: the
 * PostgreSQL connection pool and the SMTP mailer.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables. Services that fail
 * to initialize are set to `None` and the server continues without them;
 * errors are logged but never prevent startup.
 *
 * Relevant variables:
 * - `DATABASE_URL` - PostgreSQL connection string
 * - `SMTP_HOST` / `SMTP_USERNAME` / `SMTP_PASSWORD` / `SMTP_PORT` /
 *   `SMTP_FROM` - mail relay
 * - `JWT_SECRET`, `RESET_SECRET` - token signing keys
 * - `ACCESS_TOKEN_TTL_SECS`, `REFRESH_TOKEN_TTL_SECS`,
 *   `RESET_TOKEN_TTL_SECS` - expiry windows
 * - `RESET_LINK_BASE` - base URL embedded in reset emails
 */

use sqlx::PgPool;

use crate::backend::email::Mailer;

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool
///
/// Reads `DATABASE_URL`, connects, and runs migrations. Returns `None` on
/// any failure so the server can still start with database features
/// disabled.
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Load the SMTP mailer
///
/// Returns `None` when the `SMTP_*` variables are absent; the reset flow
/// then logs reset links instead of mailing them.
pub fn load_mailer() -> Option<Mailer> {
    match Mailer::from_env() {
        Some(mailer) => {
            tracing::info!("SMTP mailer configured");
            Some(mailer)
        }
        None => {
            tracing::warn!("SMTP not configured. Reset emails will be logged, not sent.");
            None
        }
    }
}
