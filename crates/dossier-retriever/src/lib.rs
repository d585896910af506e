//! Dossier Retriever
//!
//! Expands search intents into diverse candidate URLs, then runs a bounded
//! worker pool that fetches and extracts pages until the evidence is
//! sufficient or the wall-clock budget expires.
//!
//! # Guarantees
//!
//! - No two returned sources share a content hash
//! - At most `max_sources` sources are returned
//! - Within one selection round no two chosen URLs share a normalized domain
//! - Source order reflects completion order, not submission order; callers
//!   must not assume index 0 is the best source

#![warn(missing_docs)]

pub mod options;
pub mod pool;
pub mod select;

use dossier_domain::traits::{PageFetcher, SearchProvider, TextExtractor};
use dossier_domain::{EvidenceSource, Intent, TraceEvent};
use std::sync::Arc;
use tracing::info;

pub use options::RetrieveOptions;
pub use pool::{MIN_TEXT_CHARS, SUFFICIENT_TOTAL_CHARS};
pub use select::MIN_SNIPPET_CHARS;

/// Result of one retrieval pass.
#[derive(Debug, Clone, Default)]
pub struct Retrieval {
    /// Telemetry for the pass, in emission order.
    pub trace: Vec<TraceEvent>,
    /// Collected evidence, deduplicated and capped.
    pub sources: Vec<EvidenceSource>,
}

/// The evidence retriever.
pub struct Retriever {
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn TextExtractor>,
}

impl Retriever {
    /// Create a retriever over the given capabilities.
    pub fn new(
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            search,
            fetcher,
            extractor,
        }
    }

    /// Run one retrieval pass over the intents.
    pub async fn retrieve(&self, intents: &[Intent], options: &RetrieveOptions) -> Retrieval {
        let mut trace = Vec::new();

        let candidates =
            select::select_candidates(&self.search, intents, options, &mut trace).await;
        info!(
            intents = intents.len(),
            candidates = candidates.len(),
            "candidate selection complete"
        );

        let (sources, pool_trace) =
            pool::run_pool(&self.fetcher, &self.extractor, candidates, options).await;
        trace.extend(pool_trace);

        info!(sources = sources.len(), "retrieval pass complete");
        Retrieval { trace, sources }
    }
}
