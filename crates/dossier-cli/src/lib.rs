//! Dossier CLI
//!
//! Wires the real capabilities (Ollama generation, HTTP search, page fetch,
//! readability extraction, artifact cache) into an orchestrator and exposes
//! the `ask` command.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;

use dossier_cache::{MemoryCache, SqliteCache};
use dossier_domain::traits::ArtifactCache;
use dossier_llm::OllamaProvider;
use dossier_orchestrator::Orchestrator;
use dossier_web::{HttpFetcher, HttpSearch, ReadabilityExtractor};
use std::sync::Arc;

pub use cli::{AskArgs, Cli, Command};
pub use config::CliConfig;

/// Build an orchestrator over the real capability implementations.
pub fn build_orchestrator(config: &CliConfig) -> anyhow::Result<Orchestrator> {
    config
        .orchestrator
        .validate()
        .map_err(anyhow::Error::msg)?;

    let provider = Arc::new(OllamaProvider::new(
        config.ollama_url.as_str(),
        config.model.as_str(),
    ));
    let search = Arc::new(HttpSearch::new(
        config.search_url.as_str(),
        config.search_api_key.clone(),
    ));
    let cache: Arc<dyn ArtifactCache> = match &config.cache_path {
        Some(path) => Arc::new(
            SqliteCache::open(path)
                .map_err(|e| anyhow::anyhow!("failed to open cache at {}: {}", path.display(), e))?,
        ),
        None => Arc::new(MemoryCache::new()),
    };

    Ok(Orchestrator::new(
        provider,
        search,
        Arc::new(HttpFetcher::new()),
        Arc::new(ReadabilityExtractor::new()),
        cache,
        config.orchestrator.clone(),
    ))
}
