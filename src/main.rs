use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use academic_paraphraser::config::Config;
use academic_paraphraser::paraphraser::Paraphraser;
use academic_paraphraser::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("academic_paraphraser=info,tower_http=info")),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();

    if config.credential().is_none() {
        tracing::warn!(
            "No provider credential configured; requests will fail until TOGETHER_API_KEY is set"
        );
    }

    let paraphraser = Arc::new(
        Paraphraser::from_config(&config).context("Failed to build provider transport")?,
    );

    let bind: SocketAddr = config.server.bind.parse().with_context(|| {
        format!(
            "Invalid PARAPHRASER_BIND '{}' (expected host:port)",
            config.server.bind
        )
    })?;

    server::serve(paraphraser, config.server.shell, bind).await
}
