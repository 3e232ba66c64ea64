//! REST API server module
//!
//! Serves the browser page at `/` and an OpenAPI 3.1 compliant REST API
//! under `/api/v1` for downloading videos and previewing their metadata.

use crate::{Config, Result, VideoDownloader};
use axum::{
    Router,
    http::{HeaderName, HeaderValue, header},
    routing::{get, post},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Prefix under which the REST API is mounted
pub const API_PREFIX: &str = "/api/v1";

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Browser
/// - `GET /` - Single-page download form
///
/// ## Downloads (under `/api/v1`)
/// - `POST /downloads` - Download a video and return its bytes
/// - `POST /metadata` - Preview id, title, and filename
///
/// ## System (under `/api/v1`)
/// - `GET /capabilities` - Query extractor capabilities and load
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
///
/// `GET /swagger-ui` serves interactive documentation when enabled.
pub fn create_router(downloader: Arc<VideoDownloader>, config: Arc<Config>) -> Router {
    let state = AppState::new(downloader, config.clone());

    let api = Router::new()
        // Downloads
        .route("/downloads", post(routes::download_video))
        .route("/metadata", post(routes::fetch_metadata))
        // System
        .route("/capabilities", get(routes::get_capabilities))
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec));

    let router = Router::new()
        .route("/", get(routes::index_page))
        .nest(API_PREFIX, api);

    // Merge Swagger UI routes if enabled in config (before applying state).
    // The UI gets its own copy of the document so it does not collide with
    // the /api/v1/openapi.json handler.
    let router = if config.server.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    // Add state to all routes
    let router = router.with_state(state).layer(TraceLayer::new_for_http());

    // Apply CORS middleware if enabled in config
    if config.server.api.cors_enabled {
        let cors = build_cors_layer(&config.server.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// # Arguments
///
/// * `origins` - List of allowed origins ("*" allows any, an empty list none)
///
/// # Returns
///
/// A configured CorsLayer that allows the specified origins, all methods,
/// and all headers, and exposes the filename headers to scripts.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    // Check if "*" (all origins) is in the list
    let allow_any = origins.iter().any(|o| o == "*");

    let expose = [
        header::CONTENT_DISPOSITION,
        HeaderName::from_static(routes::DOWNLOAD_FILENAME_HEADER),
    ];

    if allow_any {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(expose)
    } else {
        // Specific origins only; unparsable entries are skipped
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(expose)
    }
}

/// Start the API server on the configured bind address.
///
/// Runs until the task is aborted or the listener fails. See
/// [`start_api_server_with_shutdown`] for a server that stops on a signal.
///
/// # Example
///
/// ```no_run
/// use tubegrab::{VideoDownloader, Config};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let downloader = Arc::new(VideoDownloader::new((*config).clone())?);
///
/// // Start API server (blocks until the process exits)
/// tubegrab::api::start_api_server(downloader, config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(
    downloader: Arc<VideoDownloader>,
    config: Arc<Config>,
) -> Result<()> {
    start_api_server_with_shutdown(downloader, config, std::future::pending()).await
}

/// Start the API server and stop it gracefully once `shutdown` completes
///
/// In-flight requests are allowed to finish before this returns.
pub async fn start_api_server_with_shutdown<F>(
    downloader: Arc<VideoDownloader>,
    config: Arc<Config>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_address = config.server.api.bind_address;

    tracing::info!(
        address = %bind_address,
        "Starting API server"
    );

    // Create the router with all routes
    let app = create_router(downloader, config);

    // Bind TCP listener to the configured address
    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    let local_address = listener.local_addr().map_err(crate::error::Error::Io)?;
    tracing::info!(
        address = %local_address,
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
