//! Phase A: sequential candidate selection
//!
//! Expands intents into a domain-diverse candidate list. Within one
//! selection round no two chosen URLs share a normalized domain, and
//! thin results (short snippets) are skipped.

use crate::options::RetrieveOptions;
use dossier_domain::traits::SearchProvider;
use dossier_domain::{normalized_domain, Intent, TraceEvent};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Minimum snippet length for a result to be considered informative.
pub const MIN_SNIPPET_CHARS: usize = 30;

/// A URL chosen for fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The URL to fetch.
    pub url: String,
}

/// Select candidate URLs for each intent in order.
///
/// A search failure aborts only that intent's selection; later intents
/// still run. Appends `search` and `select` events to `trace`.
pub async fn select_candidates(
    search: &Arc<dyn SearchProvider>,
    intents: &[Intent],
    options: &RetrieveOptions,
    trace: &mut Vec<TraceEvent>,
) -> Vec<Candidate> {
    let mut chosen_domains: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for intent in intents {
        let results = match search.search(&intent.query, options.search_k).await {
            Ok(results) => results,
            Err(e) => {
                warn!(query = %intent.query, error = %e, "search failed, skipping intent");
                continue;
            }
        };

        trace.push(TraceEvent::Search {
            query: intent.query.clone(),
            result_count: results.len(),
        });

        let mut picked = 0;
        for result in &results {
            if picked >= options.per_intent_urls {
                break;
            }
            let domain = normalized_domain(&result.link);
            if domain.is_empty() {
                continue;
            }
            if chosen_domains.contains(&domain) {
                debug!(url = %result.link, "domain already chosen this round");
                continue;
            }
            if result.snippet.chars().count() < MIN_SNIPPET_CHARS {
                debug!(url = %result.link, "snippet too thin");
                continue;
            }

            chosen_domains.insert(domain.clone());
            trace.push(TraceEvent::Select {
                chosen: result.link.clone(),
                reason: format!("new domain '{}', informative snippet", domain),
            });
            candidates.push(Candidate {
                url: result.link.clone(),
            });
            picked += 1;
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_domain::SearchResult;
    use dossier_web::StubSearch;

    const GOOD_SNIPPET: &str = "an informative snippet easily above thirty characters";

    fn result(link: &str, snippet: &str) -> SearchResult {
        SearchResult {
            title: "title".to_string(),
            link: link.to_string(),
            snippet: snippet.to_string(),
        }
    }

    fn search_over(results: Vec<SearchResult>) -> Arc<dyn SearchProvider> {
        Arc::new(StubSearch::new(results))
    }

    #[tokio::test]
    async fn test_domain_diversity_within_round() {
        let search = search_over(vec![
            result("https://example.com/one", GOOD_SNIPPET),
            result("https://www.example.com/two", GOOD_SNIPPET),
            result("https://other.org/page", GOOD_SNIPPET),
        ]);
        let intents = vec![Intent::new("a query")];
        let options = RetrieveOptions {
            per_intent_urls: 3,
            ..Default::default()
        };
        let mut trace = Vec::new();

        let candidates = select_candidates(&search, &intents, &options, &mut trace).await;

        let domains: Vec<String> = candidates
            .iter()
            .map(|c| normalized_domain(&c.url))
            .collect();
        let unique: HashSet<&String> = domains.iter().collect();
        assert_eq!(domains.len(), unique.len());
        assert_eq!(candidates.len(), 2);
    }

    #[tokio::test]
    async fn test_diversity_spans_intents_in_one_round() {
        let search = search_over(vec![result("https://example.com/page", GOOD_SNIPPET)]);
        let intents = vec![Intent::new("first query"), Intent::new("second query")];
        let mut trace = Vec::new();

        let candidates =
            select_candidates(&search, &intents, &RetrieveOptions::default(), &mut trace).await;

        // Same single result for both intents; the second is a duplicate domain.
        assert_eq!(candidates.len(), 1);
    }

    #[tokio::test]
    async fn test_thin_snippets_skipped() {
        let search = search_over(vec![
            result("https://thin.com/page", "too short"),
            result("https://rich.com/page", GOOD_SNIPPET),
        ]);
        let intents = vec![Intent::new("a query")];
        let mut trace = Vec::new();

        let candidates =
            select_candidates(&search, &intents, &RetrieveOptions::default(), &mut trace).await;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://rich.com/page");
    }

    #[tokio::test]
    async fn test_per_intent_cap() {
        let results: Vec<SearchResult> = (0..6)
            .map(|i| result(&format!("https://site{}.com/p", i), GOOD_SNIPPET))
            .collect();
        let search = search_over(results);
        let intents = vec![Intent::new("a query")];
        let options = RetrieveOptions {
            per_intent_urls: 2,
            ..Default::default()
        };
        let mut trace = Vec::new();

        let candidates = select_candidates(&search, &intents, &options, &mut trace).await;
        assert_eq!(candidates.len(), 2);
    }

    #[tokio::test]
    async fn test_search_failure_aborts_only_owning_intent() {
        let search: Arc<dyn SearchProvider> = Arc::new(StubSearch::failing());
        let intents = vec![Intent::new("a query"), Intent::new("b query")];
        let mut trace = Vec::new();

        let candidates =
            select_candidates(&search, &intents, &RetrieveOptions::default(), &mut trace).await;

        assert!(candidates.is_empty());
        // No search events recorded for failed intents.
        assert!(trace.is_empty());
    }

    #[tokio::test]
    async fn test_trace_events_recorded() {
        let search = search_over(vec![result("https://example.com/p", GOOD_SNIPPET)]);
        let intents = vec![Intent::new("a query")];
        let mut trace = Vec::new();

        select_candidates(&search, &intents, &RetrieveOptions::default(), &mut trace).await;

        assert!(matches!(trace[0], TraceEvent::Search { .. }));
        assert!(matches!(trace[1], TraceEvent::Select { .. }));
    }
}
