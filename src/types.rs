//! Core types for tubegrab

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// MIME type of every artifact handed back to the browser
pub const VIDEO_MP4: &str = "video/mp4";

/// A user's request to fetch one video
///
/// The URL is opaque: it is only checked for non-emptiness before it is
/// handed to the extractor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FetchRequest {
    /// Video page URL (e.g. `https://www.youtube.com/watch?v=...`)
    #[serde(default)]
    pub url: Option<String>,
}

impl FetchRequest {
    /// Create a request for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// The trimmed URL, or `None` when missing or blank
    pub fn target(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Metadata returned by the extractor's read-only query
///
/// Only the fields needed for the filename are kept; anything else in the
/// tool's JSON is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VideoMetadata {
    /// Site-specific video identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Video title as shown on the site
    #[serde(default)]
    pub title: Option<String>,
}

/// Metadata plus the filename a download would be saved under
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetadataPreview {
    /// Site-specific video identifier, if the site reported one
    pub id: Option<String>,
    /// Video title, if the site reported one
    pub title: Option<String>,
    /// Filename the downloaded file will carry
    pub filename: String,
}

/// A finished download: the captured bytes and their filename
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultArtifact {
    bytes: Vec<u8>,
    filename: String,
}

impl ResultArtifact {
    /// Build an artifact from captured bytes and a computed filename
    pub fn new(bytes: Vec<u8>, filename: String) -> Self {
        Self { bytes, filename }
    }

    /// The captured media bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The filesystem-safe filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// MIME type of the media
    pub fn mime_type(&self) -> &'static str {
        VIDEO_MP4
    }

    /// Whether the download produced zero bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Split into bytes and filename
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.bytes, self.filename)
    }
}

/// Progress of a single download through the orchestrator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadPhase {
    /// Request accepted, nothing fetched yet
    Idle,
    /// Metadata known and filename computed
    MetadataFetched,
    /// Media captured into the buffer
    Complete,
}

impl fmt::Display for DownloadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadPhase::Idle => f.write_str("idle"),
            DownloadPhase::MetadataFetched => f.write_str("metadata_fetched"),
            DownloadPhase::Complete => f.write_str("complete"),
        }
    }
}

/// What this instance can do, reported by `GET /capabilities`
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Capabilities {
    /// Extractor implementation name (e.g. "cli-yt-dlp")
    pub extractor: String,
    /// Whether metadata queries are available
    pub can_fetch_metadata: bool,
    /// Whether media downloads are available
    pub can_download: bool,
    /// Maximum downloads processed at the same time
    pub max_concurrent_downloads: usize,
    /// Downloads currently in progress
    pub in_flight: usize,
}
