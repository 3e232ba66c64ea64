//! Stub extractor for graceful degradation

use super::traits::{Extractor, ExtractorCapabilities};
use crate::capture::CaptureSink;
use crate::types::VideoMetadata;
use async_trait::async_trait;

/// Stub extractor used when no yt-dlp binary is available
///
/// The server still starts and serves the page; every request fails with
/// `Error::NotSupported`, which the page shows as an ordinary error.
///
/// # Examples
///
/// ```
/// use tubegrab::capture::MediaBuffer;
/// use tubegrab::extractor::{Extractor, UnavailableExtractor};
///
/// # #[tokio::main]
/// # async fn main() {
/// let extractor = UnavailableExtractor;
/// assert!(extractor.fetch_metadata("https://example.com").await.is_err());
///
/// let mut buffer = MediaBuffer::new();
/// assert!(extractor.download("https://example.com", &mut buffer.sink()).await.is_err());
/// assert!(buffer.is_empty());
/// # }
/// ```
pub struct UnavailableExtractor;

const MISSING_BINARY: &str = "downloading requires the yt-dlp binary. \
     Configure ytdlp_path in config or ensure yt-dlp is in PATH.";

#[async_trait]
impl Extractor for UnavailableExtractor {
    async fn fetch_metadata(&self, _url: &str) -> crate::Result<VideoMetadata> {
        Err(crate::Error::NotSupported(MISSING_BINARY.into()))
    }

    async fn download(&self, _url: &str, _sink: &mut CaptureSink<'_>) -> crate::Result<u64> {
        Err(crate::Error::NotSupported(MISSING_BINARY.into()))
    }

    fn capabilities(&self) -> ExtractorCapabilities {
        ExtractorCapabilities {
            can_fetch_metadata: false,
            can_download: false,
        }
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}
