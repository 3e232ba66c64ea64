//! Traits and types for the extraction collaborator

use crate::capture::CaptureSink;
use crate::types::VideoMetadata;
use async_trait::async_trait;

/// Capabilities of an extractor implementation
#[derive(Debug, Clone, Copy)]
pub struct ExtractorCapabilities {
    /// Can answer read-only metadata queries
    pub can_fetch_metadata: bool,
    /// Can download media bytes
    pub can_download: bool,
}

/// Trait for resolving a source URL into metadata and media bytes
///
/// Implementations can drive an external binary or provide stub
/// functionality for graceful degradation. The media sink is always passed in
/// by the caller, so an implementation never decides where bytes end up.
///
/// # Examples
///
/// ```no_run
/// use tubegrab::capture::MediaBuffer;
/// use tubegrab::extractor::{CliExtractor, Extractor};
/// use tubegrab::config::ExtractorConfig;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = CliExtractor::from_path(ExtractorConfig::default())
///     .expect("yt-dlp binary not found");
///
/// let url = "https://www.youtube.com/watch?v=...";
/// let metadata = extractor.fetch_metadata(url).await?;
/// println!("Title: {:?}", metadata.title);
///
/// let mut buffer = MediaBuffer::new();
/// extractor.download(url, &mut buffer.sink()).await?;
/// println!("Captured {} bytes", buffer.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Query id and title without downloading anything
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tool cannot be started (for CLI implementations)
    /// - The site rejects the URL or the tool reports a failure
    /// - The operation is not supported (for stub implementations)
    async fn fetch_metadata(&self, url: &str) -> crate::Result<VideoMetadata>;

    /// Download the media for `url`, writing every byte into `sink`
    ///
    /// Returns the number of bytes written. Zero is not an error here; the
    /// caller decides what an empty result means.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tool cannot be started (for CLI implementations)
    /// - The download fails part way (partial bytes are left in the sink)
    /// - The operation is not supported (for stub implementations)
    async fn download(&self, url: &str, sink: &mut CaptureSink<'_>) -> crate::Result<u64>;

    /// Query capabilities of this extractor
    fn capabilities(&self) -> ExtractorCapabilities;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
