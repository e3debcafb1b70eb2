//! Server Module
//!
//! Server initialization, application state, and configuration loading.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── config.rs - Database and mailer loading from environment
//! ├── state.rs  - AppState and FromRef implementations
//! └── init.rs   - Application assembly (create_app)
//! ```

/// Database and mailer configuration
pub mod config;

/// Application state
pub mod state;

/// Application assembly
pub mod init;

pub use init::create_app;
pub use state::AppState;
