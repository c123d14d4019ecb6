//! Application route configuration.

use axum::{extract::DefaultBodyLimit, middleware, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{auth_routes, event_routes, health_routes};
use super::middleware::rate_limit_auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::MAX_UPLOAD_BYTES;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Probes (no rate limiting)
        .merge(health_routes())
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Registration and login (rate limited when Redis is configured)
        .merge(
            auth_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    rate_limit_auth_middleware,
                ))
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .merge(event_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
