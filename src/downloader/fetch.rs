//! Metadata query and capture of a download into memory.

use crate::capture::MediaBuffer;
use crate::error::{Error, Result, Stage};
use crate::types::{DownloadPhase, FetchRequest, MetadataPreview, ResultArtifact, VideoMetadata};
use crate::utils::artifact_filename;
use std::future::Future;
use std::time::Duration;

use super::VideoDownloader;

impl VideoDownloader {
    /// Download a video into memory and return its bytes with a filename
    ///
    /// The metadata query runs first so the filename is known before any
    /// media is fetched. The media is then captured into a buffer owned by
    /// this call and handed back whole. A zero-byte result is returned as-is;
    /// callers decide whether that is a failure.
    ///
    /// Extractor faults propagate unchanged. The concurrency permit is
    /// released on every exit path.
    pub async fn download_video(&self, request: &FetchRequest) -> Result<ResultArtifact> {
        let url = request.target().ok_or(Error::MissingUrl)?;

        let _permit = self
            .concurrent_limit
            .acquire()
            .await
            .map_err(|_| Error::Other("download limiter closed".into()))?;

        let mut phase = DownloadPhase::Idle;
        tracing::info!(url, %phase, "Starting download");

        let metadata = self.query_metadata(url).await?;
        let filename = artifact_filename(&metadata);
        phase = DownloadPhase::MetadataFetched;
        tracing::debug!(url, %phase, filename = %filename, "Metadata fetched");

        let mut buffer = MediaBuffer::new();
        let reported = {
            let mut sink = buffer.sink();
            with_time_limit(
                Stage::Download,
                self.config.extractor.download_timeout,
                self.extractor.download(url, &mut sink),
            )
            .await
            .inspect_err(|e| tracing::warn!(url, %phase, error = %e, "Download failed"))?
        };

        phase = DownloadPhase::Complete;
        tracing::info!(
            url,
            %phase,
            filename = %filename,
            bytes = buffer.len(),
            reported,
            "Download captured"
        );

        Ok(ResultArtifact::new(buffer.into_bytes(), filename))
    }

    /// Look up a video's id and title without downloading it
    ///
    /// Not bounded by the download semaphore.
    pub async fn fetch_metadata(&self, request: &FetchRequest) -> Result<MetadataPreview> {
        let url = request.target().ok_or(Error::MissingUrl)?;
        let metadata = self.query_metadata(url).await?;
        let filename = artifact_filename(&metadata);

        Ok(MetadataPreview {
            id: metadata.id,
            title: metadata.title,
            filename,
        })
    }

    async fn query_metadata(&self, url: &str) -> Result<VideoMetadata> {
        with_time_limit(
            Stage::Metadata,
            self.config.extractor.metadata_timeout,
            self.extractor.fetch_metadata(url),
        )
        .await
        .inspect_err(|e| tracing::warn!(url, error = %e, "Metadata query failed"))
    }
}

/// Await `fut`, failing with [`Error::Timeout`] once `limit` elapses
///
/// Dropping the future on timeout drops any child process it owns.
async fn with_time_limit<T>(
    stage: Stage,
    limit: Option<Duration>,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| Error::Timeout {
                stage,
                timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            })?,
        None => fut.await,
    }
}
