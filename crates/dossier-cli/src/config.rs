//! Configuration for the CLI binary.

use anyhow::Context;
use dossier_orchestrator::OrchestratorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::AskArgs;

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_search_url() -> String {
    "https://google.serper.dev/search".to_string()
}

/// CLI configuration, loadable from a TOML file.
///
/// Command-line flags and environment variables override file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Ollama endpoint.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Search API endpoint.
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Search API key. Missing key makes searches fail with a credentials
    /// error; the pipeline still runs but collects no evidence.
    #[serde(default)]
    pub search_api_key: Option<String>,

    /// SQLite cache path. In-memory cache when absent.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    /// Pipeline configuration.
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ollama_url: default_ollama_url(),
            model: default_model(),
            search_url: default_search_url(),
            search_api_key: None,
            cache_path: None,
            orchestrator: OrchestratorConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .orchestrator
            .validate()
            .map_err(anyhow::Error::msg)
            .context("invalid orchestrator configuration")?;
        Ok(config)
    }

    /// Apply command-line and environment overrides.
    pub fn apply_overrides(&mut self, args: &AskArgs) {
        if let Some(url) = &args.ollama_url {
            self.ollama_url = url.clone();
        }
        if let Some(model) = &args.model {
            self.model = model.clone();
        }
        if let Some(url) = &args.search_url {
            self.search_url = url.clone();
        }
        if let Some(key) = &args.search_api_key {
            self.search_api_key = Some(key.clone());
        }
        if let Some(path) = &args.cache_path {
            self.cache_path = Some(path.clone());
        }
    }
}
