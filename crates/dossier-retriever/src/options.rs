//! Retrieval options

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options governing one retrieval pass.
///
/// The wall-clock budget bounds when new fetch work may start; a task that
/// begins just before the budget expires is allowed to finish, so actual
/// run time can overshoot by up to one fetch hard-timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveOptions {
    /// Wall-clock budget for the fetch/extract phase, in milliseconds.
    pub budget_ms: u64,

    /// Maximum candidate URLs selected per intent.
    pub per_intent_urls: usize,

    /// Maximum parallel fetch workers.
    pub concurrency: usize,

    /// Hard cap on collected sources.
    pub max_sources: usize,

    /// Minimum sources before total-text sufficiency can stop retrieval.
    pub min_sources: usize,

    /// Results requested per search query.
    pub search_k: usize,
}

impl RetrieveOptions {
    /// The retrieval budget as a [`Duration`].
    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.budget_ms)
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), String> {
        if self.per_intent_urls == 0 {
            return Err("per_intent_urls must be greater than 0".to_string());
        }
        if self.concurrency == 0 {
            return Err("concurrency must be greater than 0".to_string());
        }
        if self.max_sources == 0 {
            return Err("max_sources must be greater than 0".to_string());
        }
        if self.min_sources > self.max_sources {
            return Err("min_sources cannot exceed max_sources".to_string());
        }
        if self.search_k == 0 {
            return Err("search_k must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Quick preset: tight budget, low fan-out.
    pub fn quick() -> Self {
        Self {
            budget_ms: 4_000,
            per_intent_urls: 1,
            concurrency: 3,
            max_sources: 4,
            min_sources: 2,
            search_k: 5,
        }
    }

    /// Thorough preset: wide fan-out for verification-grade evidence.
    pub fn thorough() -> Self {
        Self {
            budget_ms: 15_000,
            per_intent_urls: 3,
            concurrency: 6,
            max_sources: 8,
            min_sources: 3,
            search_k: 10,
        }
    }

    /// Load options from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("failed to parse TOML: {}", e))
    }

    /// Serialize options to a TOML string.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("failed to serialize to TOML: {}", e))
    }
}

impl Default for RetrieveOptions {
    fn default() -> Self {
        Self {
            budget_ms: 8_000,
            per_intent_urls: 2,
            concurrency: 4,
            max_sources: 6,
            min_sources: 2,
            search_k: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        assert!(RetrieveOptions::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(RetrieveOptions::quick().validate().is_ok());
        assert!(RetrieveOptions::thorough().validate().is_ok());
    }

    #[test]
    fn test_min_sources_above_max_rejected() {
        let options = RetrieveOptions {
            min_sources: 7,
            max_sources: 6,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let options = RetrieveOptions {
            concurrency: 0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let options = RetrieveOptions::thorough();
        let toml_str = options.to_toml().unwrap();
        let parsed = RetrieveOptions::from_toml(&toml_str).unwrap();
        assert_eq!(options, parsed);
    }
}
