//! CLI-based extractor using the external yt-dlp binary

use super::traits::{Extractor, ExtractorCapabilities};
use crate::capture::CaptureSink;
use crate::config::ExtractorConfig;
use crate::error::Stage;
use crate::types::VideoMetadata;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{ChildStderr, Command};

/// CLI-based extractor using the external yt-dlp binary
///
/// Metadata is read from `--dump-single-json`. Media is requested with
/// `--output -`, so yt-dlp writes the file to its stdout, which is piped into
/// the caller's sink. yt-dlp's own log lines go to stderr and are forwarded to
/// tracing, never into the media bytes.
///
/// # Examples
///
/// ```no_run
/// use tubegrab::config::ExtractorConfig;
/// use tubegrab::extractor::CliExtractor;
/// use std::path::PathBuf;
///
/// // Create with explicit path
/// let extractor = CliExtractor::new(
///     PathBuf::from("/usr/local/bin/yt-dlp"),
///     ExtractorConfig::default(),
/// );
///
/// // Or auto-discover from PATH
/// let extractor = CliExtractor::from_path(ExtractorConfig::default())
///     .expect("yt-dlp not found in PATH");
/// ```
pub struct CliExtractor {
    binary_path: PathBuf,
    config: ExtractorConfig,
}

impl CliExtractor {
    /// Create a new CLI extractor with an explicit binary path
    pub fn new(binary_path: PathBuf, config: ExtractorConfig) -> Self {
        Self {
            binary_path,
            config,
        }
    }

    /// Attempt to find yt-dlp in PATH
    ///
    /// Returns `None` if the binary is not found.
    pub fn from_path(config: ExtractorConfig) -> Option<Self> {
        which::which("yt-dlp")
            .ok()
            .map(|path| Self::new(path, config))
    }

    /// Path of the binary this extractor runs
    pub fn binary_path(&self) -> &PathBuf {
        &self.binary_path
    }

    fn client_hints(&self) -> Option<String> {
        if self.config.player_clients.is_empty() {
            return None;
        }
        Some(format!(
            "youtube:player_client={}",
            self.config.player_clients.join(",")
        ))
    }

    /// Arguments for the read-only metadata query
    pub(crate) fn metadata_args(&self, url: &str) -> Vec<String> {
        let mut args: Vec<String> = [
            "--dump-single-json",
            "--skip-download",
            "--no-playlist",
            "--quiet",
            "--no-warnings",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        if let Some(hints) = self.client_hints() {
            args.push("--extractor-args".into());
            args.push(hints);
        }

        // "--" keeps a URL that starts with '-' from being read as an option
        args.push("--".into());
        args.push(url.to_string());
        args
    }

    /// Arguments for the media download to stdout
    pub(crate) fn download_args(&self, url: &str) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--output".into(),
            "-".into(),
            "--format".into(),
            self.config.format.clone(),
            "--no-playlist".into(),
            "--quiet".into(),
            "--no-progress".into(),
        ];

        if let Some(hints) = self.client_hints() {
            args.push("--extractor-args".into());
            args.push(hints);
        }

        args.push("--".into());
        args.push(url.to_string());
        args
    }

    fn command(&self, args: Vec<String>) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl Extractor for CliExtractor {
    async fn fetch_metadata(&self, url: &str) -> crate::Result<VideoMetadata> {
        let output = self
            .command(self.metadata_args(url))
            .output()
            .await
            .map_err(|e| crate::Error::ExternalTool(format!("Failed to execute yt-dlp: {}", e)))?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr);
            return Err(crate::Error::Extraction {
                stage: Stage::Metadata,
                message: failure_message(last_line(&message), output.status),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| crate::Error::Extraction {
            stage: Stage::Metadata,
            message: format!("yt-dlp returned unreadable metadata: {}", e),
        })
    }

    async fn download(&self, url: &str, sink: &mut CaptureSink<'_>) -> crate::Result<u64> {
        let mut child = self
            .command(self.download_args(url))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| crate::Error::ExternalTool(format!("Failed to execute yt-dlp: {}", e)))?;

        let (Some(mut stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(crate::Error::ExternalTool(
                "yt-dlp output pipes were not captured".into(),
            ));
        };

        // Both pipes must be drained together or a chatty stderr can stall stdout
        let (copied, last_diagnostic) =
            tokio::join!(tokio::io::copy(&mut stdout, sink), drain_diagnostics(stderr));

        let status = child.wait().await?;
        let copied = copied?;

        if !status.success() {
            return Err(crate::Error::Extraction {
                stage: Stage::Download,
                message: failure_message(last_diagnostic.as_deref(), status),
            });
        }

        tracing::debug!(bytes = copied, "yt-dlp finished writing media");
        Ok(copied)
    }

    fn capabilities(&self) -> ExtractorCapabilities {
        ExtractorCapabilities {
            can_fetch_metadata: true,
            can_download: true,
        }
    }

    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }
}

/// Forward yt-dlp's stderr to tracing, returning the last non-empty line
async fn drain_diagnostics(stderr: ChildStderr) -> Option<String> {
    let mut reader = BufReader::new(stderr);
    let mut line = Vec::new();
    let mut last = None;

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                let text = text.trim();
                if !text.is_empty() {
                    tracing::debug!(tool = "yt-dlp", "{}", text);
                    last = Some(text.to_string());
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read yt-dlp diagnostics");
                break;
            }
        }
    }

    last
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().rev().map(str::trim).find(|l| !l.is_empty())
}

fn failure_message(diagnostic: Option<&str>, status: ExitStatus) -> String {
    match diagnostic {
        Some(line) => line.to_string(),
        None => format!("yt-dlp exited with {}", status),
    }
}
