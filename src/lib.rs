//! Face Auth API - registration and login with a password plus a face photo
//!
//! A user registers with profile fields, a password and a photo containing
//! exactly one face. Login succeeds only when the password is correct and a
//! fresh photo lies within a fixed Euclidean distance of the stored face
//! template.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Identities, passwords, face templates, events
//! - **biometrics**: Image decoding and face template extraction
//! - **services**: Enrollment, verification and event listing
//! - **infra**: Database, migrations, repositories, Redis
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response bodies
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run --features dlib -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod biometrics;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{FaceTemplate, Identity, IdentitySummary, Password};
pub use errors::{AppError, AppResult};
pub use infra::{Cache, Database};
