//! Phase B: bounded fetch/extract worker pool
//!
//! Workers share one candidate queue, one wall-clock deadline, and one
//! evidence pool. Before taking work a worker checks the deadline and the
//! sufficiency predicate; a task already in flight when either fires runs to
//! completion and its result is kept. Locks are only held inside synchronous
//! blocks, never across an await.

use crate::options::RetrieveOptions;
use crate::select::Candidate;
use dossier_domain::traits::{PageFetcher, TextExtractor};
use dossier_domain::{normalized_domain, EvidenceSource, TraceEvent};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Minimum extracted text length for a page to count as evidence.
pub const MIN_TEXT_CHARS: usize = 300;

/// Total extracted characters at which retrieval is sufficient, provided
/// `min_sources` has also been reached.
pub const SUFFICIENT_TOTAL_CHARS: usize = 2_500;

/// Evidence collected so far, shared by all workers in a run.
#[derive(Debug, Default)]
struct EvidencePool {
    sources: Vec<EvidenceSource>,
    total_chars: usize,
}

impl EvidencePool {
    fn is_sufficient(&self, options: &RetrieveOptions) -> bool {
        self.sources.len() >= options.max_sources
            || (self.sources.len() >= options.min_sources
                && self.total_chars >= SUFFICIENT_TOTAL_CHARS)
    }
}

/// Run the fetch/extract pool over the candidates.
///
/// Returns collected sources in completion order (deduplicated by content
/// hash, first occurrence kept, capped at `max_sources`) and the `fetch`
/// trace events in the same order, followed by one `timing` event.
pub async fn run_pool(
    fetcher: &Arc<dyn PageFetcher>,
    extractor: &Arc<dyn TextExtractor>,
    candidates: Vec<Candidate>,
    options: &RetrieveOptions,
) -> (Vec<EvidenceSource>, Vec<TraceEvent>) {
    let start = Instant::now();
    let deadline = start + options.budget();

    let queue: Arc<Mutex<VecDeque<Candidate>>> = Arc::new(Mutex::new(candidates.into()));
    let pool: Arc<Mutex<EvidencePool>> = Arc::new(Mutex::new(EvidencePool::default()));
    let (trace_tx, mut trace_rx) = mpsc::unbounded_channel::<TraceEvent>();

    let task_count = queue.lock().unwrap().len();
    let worker_count = options.concurrency.min(task_count);

    let mut handles = Vec::with_capacity(worker_count);
    for worker_id in 0..worker_count {
        let queue = Arc::clone(&queue);
        let pool = Arc::clone(&pool);
        let fetcher = Arc::clone(fetcher);
        let extractor = Arc::clone(extractor);
        let trace_tx = trace_tx.clone();
        let options = options.clone();

        handles.push(tokio::spawn(async move {
            loop {
                if Instant::now() >= deadline {
                    debug!(worker_id, "deadline reached, worker stopping");
                    break;
                }
                if pool.lock().unwrap().is_sufficient(&options) {
                    debug!(worker_id, "evidence sufficient, worker stopping");
                    break;
                }
                let candidate = match queue.lock().unwrap().pop_front() {
                    Some(candidate) => candidate,
                    None => break,
                };

                let page = fetcher.fetch(&candidate.url).await;
                if !page.is_usable_html() {
                    debug!(url = %candidate.url, status = page.status, "page unusable, skipping");
                    continue;
                }

                let doc = match extractor.extract(&page.html, &candidate.url) {
                    Ok(doc) => doc,
                    Err(e) => {
                        warn!(url = %candidate.url, error = %e, "extraction failed, skipping");
                        continue;
                    }
                };
                if doc.text.chars().count() < MIN_TEXT_CHARS {
                    debug!(url = %candidate.url, "extracted text too short, skipping");
                    continue;
                }

                let source = EvidenceSource {
                    domain: normalized_domain(&candidate.url),
                    url: candidate.url.clone(),
                    title: doc.title,
                    excerpt: doc.excerpt,
                    content_hash: doc.content_hash,
                    text: doc.text,
                };

                {
                    let mut pool = pool.lock().unwrap();
                    pool.total_chars += source.text.chars().count();
                    pool.sources.push(source);
                }
                let _ = trace_tx.send(TraceEvent::Fetch {
                    url: candidate.url,
                    status: page.status,
                });
            }
        }));
    }
    drop(trace_tx);

    for handle in handles {
        // Worker bodies do not panic; a join error would mean cancellation.
        if let Err(e) = handle.await {
            warn!(error = %e, "retrieval worker aborted");
        }
    }

    let collected = std::mem::take(&mut *pool.lock().unwrap());
    let sources = dedup_by_hash(collected.sources, options.max_sources);

    let mut trace = Vec::new();
    while let Ok(event) = trace_rx.try_recv() {
        trace.push(event);
    }
    trace.push(TraceEvent::Timing {
        ms: start.elapsed().as_millis() as u64,
    });

    (sources, trace)
}

/// Deduplicate by content hash, keeping the first occurrence in discovery
/// order, then cap at `max_sources`.
fn dedup_by_hash(sources: Vec<EvidenceSource>, max_sources: usize) -> Vec<EvidenceSource> {
    let mut seen = std::collections::HashSet::new();
    let mut deduped: Vec<EvidenceSource> = sources
        .into_iter()
        .filter(|s| seen.insert(s.content_hash.clone()))
        .collect();
    deduped.truncate(max_sources);
    deduped
}
