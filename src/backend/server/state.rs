/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding the two optional
 * services the backend depends on:
 * - PostgreSQL connection pool (credential store and profiles)
 * - SMTP mailer (reset notifications)
 *
 * Both are `Option`s so the server can start in a partially configured
 * environment; handlers answer 503 when the database is missing, and the
 * reset flow logs instead of mailing when SMTP is missing.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to extract just the piece
 * of state they need (`State<Option<PgPool>>`) without taking the whole
 * `AppState`, following Axum's recommended pattern.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::email::Mailer;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `None` if the database is not configured (no `DATABASE_URL`).
    /// Handlers check for `None` and answer 503.
    pub db_pool: Option<PgPool>,

    /// SMTP mailer for outbound notifications
    ///
    /// `None` if SMTP is not configured; the reset flow then logs the
    /// link instead of sending it.
    pub mailer: Option<Mailer>,
}

impl AppState {
    /// State with no configured services, for tests
    pub fn empty() -> Self {
        Self {
            db_pool: None,
            mailer: None,
        }
    }
}

/// Allow handlers to extract the optional pool directly
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract the optional mailer directly
impl FromRef<AppState> for Option<Mailer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}
