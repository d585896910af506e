//! Dossier Orchestrator
//!
//! Sequences the full pipeline: plan, retrieve, draft, optionally verify and
//! rewrite, cache. Only this crate decides when a second retrieval pass runs
//! and what the generation capability is allowed to see (the evidence pack).
//!
//! # Failure policy
//!
//! Planning, claim extraction, and page fetching degrade locally and never
//! surface here. A failing search or generation capability during drafting
//! terminates the run with a single terminal error; after answer chunks have
//! been streamed, no second answer is ever emitted.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod pack;
pub mod progress;
pub mod prompt;

use dossier_domain::traits::{
    ArtifactCache, GenerationProvider, PageFetcher, SearchProvider, TextExtractor,
};
use dossier_domain::{artifact_key, Artifact, EvidenceSource, Intent, RunMode, TraceEvent};
use dossier_planner::Planner;
use dossier_retriever::{RetrieveOptions, Retriever};
use dossier_verifier::Verifier;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use config::OrchestratorConfig;
pub use error::OrchestratorError;
pub use pack::{EvidencePack, PackedSource};
pub use progress::{Progress, ProgressEvent};

/// Temperature for answer drafting.
const DRAFT_TEMPERATURE: f32 = 0.3;

/// Temperature for the grounded rewrite.
const REWRITE_TEMPERATURE: f32 = 0.2;

/// The pipeline orchestrator.
pub struct Orchestrator {
    provider: Arc<dyn GenerationProvider>,
    planner: Planner,
    retriever: Retriever,
    verifier: Verifier,
    cache: Arc<dyn ArtifactCache>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Wire an orchestrator from its capabilities.
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn TextExtractor>,
        cache: Arc<dyn ArtifactCache>,
        config: OrchestratorConfig,
    ) -> Self {
        // One generation time bound governs planning, claim extraction, and
        // drafting alike.
        let timeout = config.generation_timeout();
        Self {
            planner: Planner::new(provider.clone()).with_timeout(timeout),
            retriever: Retriever::new(search, fetcher, extractor),
            verifier: Verifier::new(provider.clone()).with_timeout(timeout),
            provider,
            cache,
            config,
        }
    }

    /// Answer a question, streaming progress to `progress`.
    ///
    /// On error, a single [`ProgressEvent::Error`] is emitted and no further
    /// events follow.
    pub async fn run(
        &self,
        question: &str,
        mode: RunMode,
        progress: Progress,
    ) -> Result<Artifact, OrchestratorError> {
        match self.run_inner(question, mode, &progress).await {
            Ok(artifact) => {
                progress.emit(ProgressEvent::Done);
                Ok(artifact)
            }
            Err(e) => {
                progress.emit(ProgressEvent::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Look up the cached artifact for a `(mode, question)` pair.
    pub async fn cached_artifact(
        &self,
        question: &str,
        mode: RunMode,
    ) -> Result<Artifact, OrchestratorError> {
        let key = artifact_key(mode, question);
        let stored = self
            .cache
            .get(&key)
            .await
            .map_err(|e| OrchestratorError::Cache(e.to_string()))?
            .ok_or_else(|| OrchestratorError::NotFound(key.clone()))?;
        serde_json::from_str(&stored)
            .map_err(|e| OrchestratorError::Cache(format!("stored artifact undecodable: {}", e)))
    }

    async fn run_inner(
        &self,
        question: &str,
        mode: RunMode,
        progress: &Progress,
    ) -> Result<Artifact, OrchestratorError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(OrchestratorError::InvalidQuestion(
                "question must not be empty".to_string(),
            ));
        }

        progress.emit(ProgressEvent::Started);

        let key = artifact_key(mode, question);
        if let Some(artifact) = self.cache_lookup(question, mode).await {
            info!(%key, "cache hit, replaying stored artifact");
            self.replay(&artifact, progress);
            return Ok(artifact);
        }

        progress.emit(ProgressEvent::Planning);
        let plan = self.planner.plan(question).await;
        let mut trace = vec![TraceEvent::Planner {
            intents: plan.intents.iter().map(|i| i.query.clone()).collect(),
        }];

        progress.emit(ProgressEvent::Searching);
        let first = self
            .retriever
            .retrieve(&plan.intents, &self.config.retrieve)
            .await;
        trace.extend(first.trace);
        let mut sources = first.sources;

        if sources.len() < mode.required_min_sources() {
            info!(
                sources = sources.len(),
                required = mode.required_min_sources(),
                "evidence below required minimum, widening search"
            );
            let widened = self.widened_intents(question, &plan.intents);
            let second = self
                .retriever
                .retrieve(&widened, &self.config.retrieve)
                .await;
            trace.extend(second.trace);
            sources = merge_by_hash(sources, second.sources, self.config.retrieve.max_sources);
        }

        if sources.is_empty() {
            return Err(OrchestratorError::DeadlineExceeded);
        }

        let pack = EvidencePack::build(&sources, &self.config);

        progress.emit(ProgressEvent::Drafting);
        let (final_answer, claims) = match mode {
            RunMode::Normal => {
                let answer = self
                    .generate_streamed(
                        prompt::draft_messages(question, &pack),
                        DRAFT_TEMPERATURE,
                        progress,
                    )
                    .await?;
                (answer, Vec::new())
            }
            RunMode::Verified => {
                // The draft stays internal; only the rewrite is streamed, so
                // a caller never sees two answers.
                let draft = self
                    .generate(prompt::draft_messages(question, &pack), DRAFT_TEMPERATURE)
                    .await?;

                progress.emit(ProgressEvent::Verifying);
                let claims = self.verifier.verify(question, &draft, &sources).await;

                if claims.is_empty() {
                    debug!("no claims extracted, finalizing draft as-is");
                    stream_text(&draft, progress);
                    (draft, claims)
                } else {
                    let answer = self
                        .generate_streamed(
                            prompt::rewrite_messages(question, &draft, &pack, &claims),
                            REWRITE_TEMPERATURE,
                            progress,
                        )
                        .await?;
                    (answer, claims)
                }
            }
        };

        if !claims.is_empty() {
            progress.emit(ProgressEvent::Claims(claims.clone()));
        }

        let artifact = Artifact {
            final_answer,
            sources,
            trace,
            claims,
        };
        self.cache_store(&key, &artifact).await;
        Ok(artifact)
    }

    fn widened_intents(&self, question: &str, intents: &[Intent]) -> Vec<Intent> {
        let mut widened = intents.to_vec();
        widened.push(Intent::new(format!("{} definition", question)));
        widened.push(Intent::new(format!("{} authoritative source", question)));
        widened
    }

    async fn generate(
        &self,
        messages: Vec<dossier_domain::ChatMessage>,
        temperature: f32,
    ) -> Result<String, OrchestratorError> {
        match tokio::time::timeout(
            self.config.generation_timeout(),
            self.provider.chat(&messages, temperature),
        )
        .await
        {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(OrchestratorError::Upstream(
                "generation timed out".to_string(),
            )),
        }
    }

    async fn generate_streamed(
        &self,
        messages: Vec<dossier_domain::ChatMessage>,
        temperature: f32,
        progress: &Progress,
    ) -> Result<String, OrchestratorError> {
        let mut on_token =
            |chunk: &str| progress.emit(ProgressEvent::AnswerChunk(chunk.to_string()));
        match tokio::time::timeout(
            self.config.generation_timeout(),
            self.provider
                .stream_chat(&messages, temperature, &mut on_token),
        )
        .await
        {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(OrchestratorError::Upstream(
                "generation timed out".to_string(),
            )),
        }
    }

    /// Best-effort cache read. Undecodable or erroring entries count as a
    /// miss.
    async fn cache_lookup(&self, question: &str, mode: RunMode) -> Option<Artifact> {
        match self.cached_artifact(question, mode).await {
            Ok(artifact) => Some(artifact),
            Err(OrchestratorError::NotFound(_)) => None,
            Err(e) => {
                warn!(error = %e, "cache read failed, proceeding without cache");
                None
            }
        }
    }

    /// Best-effort cache write.
    async fn cache_store(&self, key: &str, artifact: &Artifact) {
        let value = match serde_json::to_string(artifact) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "artifact not serializable, skipping cache store");
                return;
            }
        };
        if let Err(e) = self.cache.set(key, &value, self.config.cache_ttl()).await {
            warn!(%key, error = %e, "cache write failed");
        }
    }

    /// Replay a cached artifact as a synthetic chunked stream.
    fn replay(&self, artifact: &Artifact, progress: &Progress) {
        stream_text(&artifact.final_answer, progress);
        if !artifact.claims.is_empty() {
            progress.emit(ProgressEvent::Claims(artifact.claims.clone()));
        }
    }
}

fn stream_text(text: &str, progress: &Progress) {
    for chunk in text.split_inclusive(' ') {
        progress.emit(ProgressEvent::AnswerChunk(chunk.to_string()));
    }
}

/// Union two passes by content hash, keeping first-pass order, capped.
fn merge_by_hash(
    first: Vec<EvidenceSource>,
    second: Vec<EvidenceSource>,
    max_sources: usize,
) -> Vec<EvidenceSource> {
    let mut seen: HashSet<String> = first.iter().map(|s| s.content_hash.clone()).collect();
    let mut merged = first;
    for source in second {
        if seen.insert(source.content_hash.clone()) {
            merged.push(source);
        }
    }
    merged.truncate(max_sources);
    merged
}
