//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{auth_handler, event_handler, health_handler};
use crate::domain::{EventSummary, IdentitySummary};
use crate::types::{EventsResponse, LoginResponse, MessageResponse};

/// OpenAPI documentation for the face authentication API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Face Auth API",
        version = "0.1.0",
        description = "Registration and login with a password plus a face photo"
    ),
    servers(
        (url = "http://localhost:5328", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        event_handler::list_events,
        health_handler::health,
        health_handler::ready,
    ),
    components(
        schemas(
            auth_handler::RegisterForm,
            auth_handler::LoginForm,
            IdentitySummary,
            EventSummary,
            MessageResponse,
            LoginResponse,
            EventsResponse,
            health_handler::HealthResponse,
        )
    ),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Events", description = "Event listing"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
