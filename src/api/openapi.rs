//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the tubegrab REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the tubegrab REST API
///
/// The document can be accessed via:
/// - `/api/v1/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "tubegrab REST API",
        version = "0.1.0",
        description = "Download online videos into memory and hand them back as MP4 files",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8501", description = "Local development server")
    ),
    paths(
        // Downloads
        crate::api::routes::download_video,
        crate::api::routes::fetch_metadata,

        // System
        crate::api::routes::get_capabilities,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::FetchRequest,
        crate::types::VideoMetadata,
        crate::types::MetadataPreview,
        crate::types::Capabilities,

        // Config types from config.rs
        crate::config::Config,
        crate::config::ExtractorConfig,
        crate::config::DownloadConfig,
        crate::config::ServerIntegrationConfig,
        crate::config::ApiConfig,

        // API request/response types from routes
        crate::api::routes::HealthResponse,

        // Error types from error.rs
        crate::error::Stage,
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "downloads", description = "Downloads - Fetch a video into memory or preview its metadata"),
        (name = "system", description = "System endpoints - Health checks, capabilities, OpenAPI spec"),
    )
)]
pub struct ApiDoc;
