//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`downloads`] - Video download and metadata preview
//! - [`system`] - Health, capabilities, OpenAPI
//! - [`ui`] - The browser page served at `/`

mod downloads;
mod system;
mod ui;

// Re-export all handlers so `routes::function_name` continues to work
pub use downloads::*;
pub use system::*;
pub use ui::*;

/// Header carrying the percent-encoded artifact filename
///
/// Exposed to cross-origin scripts by the CORS layer.
pub const DOWNLOAD_FILENAME_HEADER: &str = "x-download-filename";

/// Response for GET /health
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// Always "ok" while the server is answering
    pub status: String,
    /// Crate version
    pub version: String,
}
