//! ClassHub - Main Library
//!
//! ClassHub is an account and profile-management backend for a small tutoring
//! platform. It handles user registration, JWT-based authentication, the
//! email-driven password-reset flow, and student/teacher profile records with
//! a lightweight enrollment relationship.
//!
//! # Overview
//!
//! This library provides the core functionality for ClassHub, including:
//! - Account registration with normalized email identities
//! - Login and stateless access/refresh token issuance
//! - Two-step password reset using signed, time-limited tokens
//! - Profile editing plus student/teacher role profiles
//!
//! # Module Structure
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, route configuration, auth middleware
//!   - Credential storage and password hashing
//!   - Reset-token encoding/verification and email dispatch
//!   - Database persistence (PostgreSQL via sqlx)
//!
//! # Usage
//!
//! ```rust,no_run
//! use classhub::backend::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Use app with Axum server
//! # }
//! ```

/// Server-side code
pub mod backend;
