//! Extraction collaborator
//!
//! The core abstraction is the [`Extractor`] trait. Two implementations are
//! provided:
//!
//! - [`CliExtractor`]: runs the external `yt-dlp` binary
//! - [`UnavailableExtractor`]: stub used when no binary can be found
//!
//! [`from_config`] picks one the same way at every startup: an explicit
//! `ytdlp_path` wins, then a PATH search (if enabled), then the stub.

mod cli;
mod traits;
mod unavailable;

pub use cli::CliExtractor;
pub use traits::{Extractor, ExtractorCapabilities};
pub use unavailable::UnavailableExtractor;

use crate::config::ExtractorConfig;
use std::sync::Arc;

/// Select the extractor described by `config`
pub fn from_config(config: &ExtractorConfig) -> Arc<dyn Extractor> {
    let extractor: Arc<dyn Extractor> = if let Some(ref ytdlp_path) = config.ytdlp_path {
        // Use explicitly configured binary path
        Arc::new(CliExtractor::new(ytdlp_path.clone(), config.clone()))
    } else if config.search_path {
        CliExtractor::from_path(config.clone())
            .map(|e| Arc::new(e) as Arc<dyn Extractor>)
            .unwrap_or_else(|| Arc::new(UnavailableExtractor))
    } else {
        Arc::new(UnavailableExtractor)
    };

    let caps = extractor.capabilities();
    if caps.can_download {
        tracing::info!(
            extractor = extractor.name(),
            can_fetch_metadata = caps.can_fetch_metadata,
            can_download = caps.can_download,
            "Extractor initialized"
        );
    } else {
        tracing::warn!(
            extractor = extractor.name(),
            "yt-dlp not found; downloads will fail until ytdlp_path is configured"
        );
    }

    extractor
}
