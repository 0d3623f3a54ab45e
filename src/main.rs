//! # sitelens server binary
//!
//! Parses configuration, builds the shared services once (fetcher, model
//! client, response cache), and serves the API.

use anyhow::Context;
use clap::Parser;
use sitelens::api::{self, AppState, ResponseCache};
use sitelens::config::Config;
use sitelens::fetch::PageFetcher;
use sitelens::model::ModelClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let fetcher =
        PageFetcher::with_timeout(config.fetch_timeout()).context("Failed to build page fetcher")?;

    let model = ModelClient::with_timeout(&config.model_url, &config.model, config.model_timeout())
        .context("Failed to build model client")?;
    tracing::info!("Using model {:?} at {}", model.model(), config.model_url);

    let cache = ResponseCache::new(config.cache_capacity, config.cache_ttl())
        .context("Failed to build response cache")?;

    let state = AppState::new(fetcher, model, cache);

    api::serve(config.bind, state)
        .await
        .context("Server exited with an error")?;

    Ok(())
}
