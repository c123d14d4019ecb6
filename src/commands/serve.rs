//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::biometrics::{build_encoder, FaceExtractor};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    // Connect the credential store and apply pending migrations
    let db = Arc::new(Database::connect(&config).await?);

    // Load face models once; the encoder is shared by every request
    let encoder = build_encoder(&config)?;
    let extractor = FaceExtractor::new(encoder, config.face_extraction_timeout);
    tracing::info!("Face encoder ready");

    let mut app_state =
        AppState::from_config(db, extractor).with_trusted_proxy_headers(config.trust_proxy_headers);
    if config.trust_proxy_headers {
        tracing::info!("Rate limiting keyed on proxy headers");
    }

    match config.redis_url.as_deref() {
        Some(url) => {
            let cache = Cache::connect(url)
                .await
                .map_err(|e| AppError::internal(format!("Redis connection failed: {}", e)))?;
            app_state = app_state.with_cache(Arc::new(cache));
        }
        None => tracing::warn!("REDIS_URL not set - registration and login are not rate limited"),
    }

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
