//! # tubegrab
//!
//! Browser front end for downloading online videos as MP4 files.
//!
//! A user pastes a video URL into the page served at `/`. The server asks
//! `yt-dlp` for the video's id and title, has it stream the media into an
//! in-memory buffer, and hands the bytes back as `"{id}_{title}.mp4"`.
//! Nothing is written to disk.
//!
//! ## Design
//!
//! - **No process-wide state** - each download owns its buffer and passes a
//!   [`CaptureSink`] explicitly to the extractor
//! - **Pluggable extraction** - the [`Extractor`] trait hides `yt-dlp`, so the
//!   orchestrator can be exercised without it
//! - **Bounded** - a semaphore caps how many downloads are held in memory at
//!   once (one by default)
//!
//! ## Quick Start
//!
//! ```no_run
//! use tubegrab::{Config, FetchRequest, VideoDownloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = VideoDownloader::new(Config::default())?;
//!
//!     let artifact = downloader
//!         .download_video(&FetchRequest::new("https://www.youtube.com/watch?v=abc123"))
//!         .await?;
//!     std::fs::write(artifact.filename(), artifact.bytes())?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API and browser page
pub mod api;
/// In-memory capture of extractor output
pub mod capture;
/// Configuration types
pub mod config;
/// Download orchestrator
pub mod downloader;
/// Error types
pub mod error;
/// Extraction collaborator (yt-dlp)
pub mod extractor;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use capture::{CaptureSink, MediaBuffer};
pub use config::Config;
pub use downloader::VideoDownloader;
pub use error::{ApiError, Error, ErrorDetail, Result, Stage, ToHttpStatus};
pub use extractor::{CliExtractor, Extractor, ExtractorCapabilities, UnavailableExtractor};
pub use types::{Capabilities, FetchRequest, MetadataPreview, ResultArtifact, VideoMetadata};

/// Serve the API and browser page until a termination signal arrives.
///
/// Requests already in progress are allowed to finish.
///
/// - **Unix:** listens for SIGTERM and SIGINT, falling back to SIGINT alone if
///   the SIGTERM handler cannot be registered.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use tubegrab::{VideoDownloader, Config, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let downloader = VideoDownloader::new(Config::default())?;
///
///     // Run with automatic signal handling
///     run_with_shutdown(downloader).await?;
///
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(downloader: VideoDownloader) -> Result<()> {
    let config = downloader.get_config();
    api::start_api_server_with_shutdown(std::sync::Arc::new(downloader), config, wait_for_signal())
        .await
}

/// Resolve once SIGTERM or Ctrl+C (SIGINT) arrives
async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        // Registration can fail in restricted environments (containers, tests)
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {
                        tracing::info!("Received SIGTERM signal");
                        return;
                    }
                    result = tokio::signal::ctrl_c() => {
                        log_ctrl_c(result);
                        return;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for Ctrl+C only");
            }
        }
    }

    log_ctrl_c(tokio::signal::ctrl_c().await);
}

fn log_ctrl_c(result: std::io::Result<()>) {
    match result {
        Ok(()) => tracing::info!("Received Ctrl+C signal"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C signal"),
    }
}
