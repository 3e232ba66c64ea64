//! Configuration types for tubegrab

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, path::PathBuf, time::Duration};
use utoipa::ToSchema;

/// Extraction tool settings (yt-dlp location, format preference, client hints)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExtractorConfig {
    /// Path to yt-dlp executable (auto-detected if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Whether to search PATH for yt-dlp if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Format selector passed to the download call (default: "best[ext=mp4]/best")
    #[serde(default = "default_format")]
    pub format: String,

    /// YouTube player clients to request (default: ["default", "-tv_simply"])
    ///
    /// Passed verbatim as `youtube:player_client=...`. An empty list omits the
    /// extractor argument entirely.
    #[serde(default = "default_player_clients")]
    pub player_clients: Vec<String>,

    /// Time limit for the metadata query in seconds (None = wait indefinitely)
    #[serde(default, with = "optional_duration_serde")]
    #[schema(value_type = Option<u64>)]
    pub metadata_timeout: Option<Duration>,

    /// Time limit for the media download in seconds (None = wait indefinitely)
    #[serde(default, with = "optional_duration_serde")]
    #[schema(value_type = Option<u64>)]
    pub download_timeout: Option<Duration>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            search_path: true,
            format: default_format(),
            player_clients: default_player_clients(),
            metadata_timeout: None,
            download_timeout: None,
        }
    }
}

/// Download behavior configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DownloadConfig {
    /// Maximum concurrent downloads (default: 1)
    ///
    /// Each download holds its whole file in memory until the response is
    /// sent, so this also bounds peak memory use.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_downloads: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_concurrent_downloads: default_max_concurrent(),
        }
    }
}

/// Main configuration for VideoDownloader
///
/// Sub-configs are flattened, so the JSON file is a single flat object:
///
/// ```json
/// {
///   "ytdlp_path": "/usr/local/bin/yt-dlp",
///   "format": "best[ext=mp4]/best",
///   "download_timeout": 600,
///   "max_concurrent_downloads": 2,
///   "api": { "bind_address": "0.0.0.0:8501" }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Extraction tool settings
    #[serde(flatten)]
    pub extractor: ExtractorConfig,

    /// Download behavior settings
    #[serde(flatten)]
    pub download: DownloadConfig,

    /// HTTP server settings
    #[serde(flatten)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// Missing fields take their defaults. The result is validated before it
    /// is returned.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {}", path.display(), e),
            key: None,
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
            key: None,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.download.max_concurrent_downloads == 0 {
            return Err(Error::Config {
                message: "max_concurrent_downloads must be at least 1".into(),
                key: Some("max_concurrent_downloads".into()),
            });
        }
        if self.extractor.format.trim().is_empty() {
            return Err(Error::Config {
                message: "format must not be empty".into(),
                key: Some("format".into()),
            });
        }
        if self
            .extractor
            .player_clients
            .iter()
            .any(|c| c.trim().is_empty() || c.contains(','))
        {
            return Err(Error::Config {
                message: "player_clients entries must be non-empty and contain no commas".into(),
                key: Some("player_clients".into()),
            });
        }
        Ok(())
    }
}

/// API and external server integration configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ServerIntegrationConfig {
    /// REST API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:8501)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access from other origins (default: false)
    ///
    /// The page at `/` is same-origin and never needs it.
    #[serde(default)]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: none)
    ///
    /// `"*"` allows any origin. An empty list allows none.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: false,
            cors_origins: Vec::new(),
            swagger_ui: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> String {
    "best[ext=mp4]/best".into()
}

fn default_player_clients() -> Vec<String> {
    vec!["default".into(), "-tv_simply".into()]
}

fn default_max_concurrent() -> usize {
    1
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

// Optional Duration serialization helper
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
