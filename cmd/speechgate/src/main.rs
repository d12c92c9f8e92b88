//! speechgate - HTTP text-to-speech server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use speechgate_engine::adapters::{EspeakFactory, GttsAdapter};
use speechgate_engine::{Handler, ModelLoader};

mod config;

use config::Config;

/// speechgate - HTTP text-to-speech server.
///
/// Serves `POST /api/tts` with two engines:
///   - cloud: Google Translate TTS, answers with MP3
///   - local: espeak-ng, answers with WAV
#[derive(Parser)]
#[command(name = "speechgate")]
#[command(about = "HTTP text-to-speech server")]
#[command(version)]
pub struct Cli {
    /// Config file (YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Listen host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides config)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Load the local model before accepting requests
    #[arg(long)]
    pub preload: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(host) = cli.host {
        config.listen.host = host;
    }
    if let Some(port) = cli.port {
        config.listen.port = port;
    }
    if cli.preload {
        config.local.preload = true;
    }

    let mut client = speechgate_gtts::Client::builder()
        .tld(config.cloud.tld.clone())
        .timeout(config.cloud_timeout());
    if let Some(url) = &config.cloud.base_url {
        client = client.base_url(url.clone());
    }
    let client = client.build().context("failed to build cloud client")?;
    let cloud = Arc::new(GttsAdapter::new(client).slow(config.cloud.slow));

    let loader = Arc::new(ModelLoader::new(EspeakFactory::new(config.model())));
    if config.local.preload {
        info!("preloading local model");
        loader.preload().await.context("failed to preload local model")?;
    }

    let handler = Arc::new(Handler::new(cloud, loader, config.handler()));
    let app = speechgate_server::router(handler);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    speechgate_server::serve(listener, app, shutdown_signal()).await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for ctrl-c, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
