//! API layer - HTTP handlers and middleware
//!
//! - Request handlers for registration, login, events and probes
//! - Rate limiting middleware
//! - Validated multipart extractor
//! - Route definitions and OpenAPI docs

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
