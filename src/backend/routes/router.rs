/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines the
 * public and authenticated route groups into a single Axum router.
 */

use axum::Router;

use crate::backend::routes::api_routes::{authenticated_routes, configure_public_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the optional database pool
///   and mailer
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_public_routes(Router::new());
    let router = router.merge(authenticated_routes(app_state.clone()));

    // Fallback handler for 404
    let router = router.fallback(|| async { "404 Not Found" });

    router.with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds_without_services() {
        // Route registration must not require a configured database or
        // mailer; duplicate paths would panic here.
        let _router = create_router(AppState::empty());
    }
}
