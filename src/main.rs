use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tubegrab::{Config, VideoDownloader};

/// Serve a browser page that downloads online videos as MP4 files
#[derive(Debug, Parser)]
#[command(name = "tubegrab", version, about)]
struct Args {
    /// JSON configuration file (defaults are used for missing fields)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the configuration file
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Path to the yt-dlp executable, overriding the configuration file
    #[arg(long = "yt-dlp", value_name = "PATH")]
    ytdlp: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> tubegrab::Result<Config> {
        let mut config = match self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(bind) = self.bind {
            config.server.api.bind_address = bind;
        }
        if let Some(path) = self.ytdlp {
            config.extractor.ytdlp_path = Some(path);
        }
        Ok(config)
    }
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tubegrab=debug"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

async fn run(args: Args) -> tubegrab::Result<()> {
    let config = args.into_config()?;
    let downloader = VideoDownloader::new(config)?;
    tubegrab::run_with_shutdown(downloader).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "tubegrab stopped with an error");
            eprintln!("tubegrab error: {}", err);
            ExitCode::FAILURE
        }
    }
}
