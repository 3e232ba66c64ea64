//! Download orchestrator split into focused submodules.
//!
//! The `VideoDownloader` struct and its methods are organized by domain:
//! - [`fetch`] - Metadata query and capture of a download into memory

mod fetch;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::error::Result;
use crate::extractor::{self, Extractor};
use std::sync::Arc;

/// Main downloader instance (cloneable - all fields are Arc-wrapped)
///
/// Every download gets its own in-memory buffer, so no process-wide state is
/// shared between requests. The only coordination is the semaphore bounding
/// how many downloads run at once.
#[derive(Clone)]
pub struct VideoDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Extraction collaborator (trait object for pluggable implementations)
    pub(crate) extractor: Arc<dyn Extractor>,
    /// Semaphore to limit concurrent downloads (respects max_concurrent_downloads config)
    pub(crate) concurrent_limit: Arc<tokio::sync::Semaphore>,
}

impl VideoDownloader {
    /// Create a new VideoDownloader instance
    ///
    /// Validates the configuration and selects the extractor: an explicit
    /// `ytdlp_path`, then a PATH search, then a stub that fails every call.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tubegrab::{Config, FetchRequest, VideoDownloader};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let downloader = VideoDownloader::new(Config::default())?;
    ///
    ///     let artifact = downloader
    ///         .download_video(&FetchRequest::new("https://www.youtube.com/watch?v=abc123"))
    ///         .await?;
    ///     println!("{} ({} bytes)", artifact.filename(), artifact.bytes().len());
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let extractor = extractor::from_config(&config.extractor);
        Ok(Self::with_extractor(config, extractor))
    }

    /// Create a VideoDownloader around an already-built extractor
    pub fn with_extractor(config: Config, extractor: Arc<dyn Extractor>) -> Self {
        // Create semaphore for concurrent download limiting
        let concurrent_limit = Arc::new(tokio::sync::Semaphore::new(
            config.download.max_concurrent_downloads,
        ));

        Self {
            config: Arc::new(config),
            extractor,
            concurrent_limit,
        }
    }

    /// Get the current configuration
    ///
    /// The configuration is wrapped in an Arc, so this is a cheap clone operation.
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Number of downloads currently holding a concurrency permit
    pub fn in_flight(&self) -> usize {
        self.config
            .download
            .max_concurrent_downloads
            .saturating_sub(self.concurrent_limit.available_permits())
    }

    /// Query the current system capabilities
    ///
    /// Reports which extractor was selected, what it can do, and how busy the
    /// downloader currently is.
    pub fn capabilities(&self) -> crate::types::Capabilities {
        let caps = self.extractor.capabilities();

        crate::types::Capabilities {
            extractor: self.extractor.name().to_string(),
            can_fetch_metadata: caps.can_fetch_metadata,
            can_download: caps.can_download,
            max_concurrent_downloads: self.config.download.max_concurrent_downloads,
            in_flight: self.in_flight(),
        }
    }

    /// Spawn the REST API server in a background task
    ///
    /// The server listens on the configured bind address
    /// (default: 127.0.0.1:8501) until the task is aborted.
    pub fn spawn_api_server(self: &Arc<Self>) -> tokio::task::JoinHandle<Result<()>> {
        let downloader = self.clone();
        let config = self.config.clone();

        tokio::spawn(async move { crate::api::start_api_server(downloader, config).await })
    }
}
