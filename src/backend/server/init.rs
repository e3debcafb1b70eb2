/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: loading optional services, building the shared state, and
 * configuring the router.
 *
 * # Initialization Process
 *
 * 1. Load the optional database pool (with migrations)
 * 2. Load the optional SMTP mailer
 * 3. Assemble `AppState` and the router
 *
 * Missing services never prevent startup; the affected endpoints degrade
 * to 503 (database) or log-only dispatch (mail).
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, load_mailer};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing ClassHub backend server");

    let db_pool = load_database().await;
    let mailer = load_mailer();

    let app_state = AppState { db_pool, mailer };

    let app = create_router(app_state);

    tracing::info!("Router configured");

    app
}
