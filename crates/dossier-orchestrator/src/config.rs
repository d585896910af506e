//! Orchestrator configuration

use dossier_retriever::RetrieveOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Options for each retrieval pass.
    pub retrieve: RetrieveOptions,

    /// Time-to-live of cached artifacts, in seconds.
    pub cache_ttl_secs: u64,

    /// Hard bound on one generation call (draft or rewrite), in seconds.
    pub generation_timeout_secs: u64,

    /// Maximum sources included in the evidence pack.
    pub pack_max_sources: usize,

    /// Character cap on a packed source title.
    pub pack_title_chars: usize,

    /// Character cap on a packed source excerpt.
    pub pack_excerpt_chars: usize,

    /// Character cap on a packed source body.
    pub pack_body_chars: usize,
}

impl OrchestratorConfig {
    /// Cache TTL as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Generation timeout as a [`Duration`].
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.retrieve.validate()?;
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        if self.pack_max_sources == 0 {
            return Err("pack_max_sources must be greater than 0".to_string());
        }
        if self.pack_title_chars == 0 || self.pack_excerpt_chars == 0 || self.pack_body_chars == 0 {
            return Err("evidence pack character caps must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("failed to serialize to TOML: {}", e))
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            retrieve: RetrieveOptions::default(),
            cache_ttl_secs: 2 * 60 * 60,
            generation_timeout_secs: 60,
            pack_max_sources: 6,
            pack_title_chars: 160,
            pack_excerpt_chars: 300,
            pack_body_chars: 600,
        }
    }
}
