//! HTTP search capability

use async_trait::async_trait;
use dossier_domain::traits::{SearchError, SearchProvider};
use dossier_domain::SearchResult;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default timeout for a search request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// JSON search API client.
///
/// Speaks the common `{"organic": [{"title", "link", "snippet"}]}` response
/// shape used by Serper-style search endpoints. A missing API key surfaces
/// as [`SearchError::Credentials`] at query time, which aborts only the
/// owning intent's candidate selection.
pub struct HttpSearch {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl HttpSearch {
    /// Create a search client for an endpoint, with an optional API key.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent("dossier/0.1")
            .build()
            .expect("default reqwest client");

        Self {
            endpoint: endpoint.into(),
            api_key,
            client,
        }
    }
}

#[async_trait]
impl SearchProvider for HttpSearch {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SearchError::Credentials("search API key not configured".into()))?;

        let body = serde_json::json!({ "q": query, "num": k });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Communication(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SearchError::Credentials(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(SearchError::Communication(format!("HTTP {}", status)));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        let results: Vec<SearchResult> = parsed
            .organic
            .into_iter()
            .filter(|r| !r.link.is_empty())
            .take(k)
            .map(|r| SearchResult {
                title: r.title,
                link: r.link,
                snippet: r.snippet,
            })
            .collect();

        debug!(query, count = results.len(), "search complete");
        Ok(results)
    }
}
