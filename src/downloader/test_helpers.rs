//! Shared test helpers for creating VideoDownloader instances in tests.

use crate::capture::CaptureSink;
use crate::config::Config;
use crate::downloader::VideoDownloader;
use crate::error::{Error, Result, Stage};
use crate::extractor::{Extractor, ExtractorCapabilities};
use crate::types::VideoMetadata;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted extractor: returns canned metadata and writes canned bytes
pub(crate) struct FakeExtractor {
    pub(crate) metadata: Option<VideoMetadata>,
    pub(crate) media: Vec<u8>,
    pub(crate) download_error: Option<String>,
    pub(crate) delay: Option<Duration>,
    pub(crate) metadata_calls: AtomicUsize,
    pub(crate) download_calls: AtomicUsize,
}

impl FakeExtractor {
    /// Succeeds with the given id, title, and media bytes
    pub(crate) fn new(id: &str, title: &str, media: Vec<u8>) -> Self {
        Self {
            metadata: Some(VideoMetadata {
                id: Some(id.to_string()),
                title: Some(title.to_string()),
            }),
            media,
            download_error: None,
            delay: None,
            metadata_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
        }
    }

    /// Fails the metadata query
    pub(crate) fn failing_metadata() -> Self {
        Self {
            metadata: None,
            ..Self::new("", "", Vec::new())
        }
    }

    /// Writes `media` then fails the download with `message`
    pub(crate) fn failing_download(media: Vec<u8>, message: &str) -> Self {
        Self {
            download_error: Some(message.to_string()),
            ..Self::new("abc123", "Test Clip", media)
        }
    }

    /// Sleeps for `delay` before every call
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn download_calls(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    async fn fetch_metadata(&self, _url: &str) -> Result<VideoMetadata> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.metadata.clone().ok_or_else(|| Error::Extraction {
            stage: Stage::Metadata,
            message: "ERROR: Video unavailable".into(),
        })
    }

    async fn download(&self, _url: &str, sink: &mut CaptureSink<'_>) -> Result<u64> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        sink.write_bytes(&self.media);

        match &self.download_error {
            Some(message) => Err(Error::Extraction {
                stage: Stage::Download,
                message: message.clone(),
            }),
            None => Ok(sink.bytes_written()),
        }
    }

    fn capabilities(&self) -> ExtractorCapabilities {
        ExtractorCapabilities {
            can_fetch_metadata: true,
            can_download: true,
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Build a downloader around `extractor` with default settings
pub(crate) fn create_test_downloader(extractor: Arc<FakeExtractor>) -> VideoDownloader {
    create_test_downloader_with_config(Config::default(), extractor)
}

/// Build a downloader around `extractor` with the given settings
pub(crate) fn create_test_downloader_with_config(
    config: Config,
    extractor: Arc<FakeExtractor>,
) -> VideoDownloader {
    VideoDownloader::with_extractor(config, extractor)
}

/// One hundred bytes of recognizable fake media
pub(crate) fn sample_media() -> Vec<u8> {
    (0..100u8).collect()
}
