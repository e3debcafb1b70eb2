//! Routes Module
//!
//! HTTP route configuration and router assembly.

/// Route-to-handler wiring
pub mod api_routes;

/// Router assembly
pub mod router;

pub use router::create_router;
