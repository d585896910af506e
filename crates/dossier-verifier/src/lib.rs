//! Dossier Verifier
//!
//! Extracts atomic factual claims from a draft answer and scores each
//! against chunked evidence using deterministic lexical overlap.
//!
//! The two halves have different failure contracts:
//!
//! - claim extraction calls the generation capability and **never fails** -
//!   any problem yields an empty claim list, which means "skip verification"
//! - scoring is pure and deterministic; no capability is involved

#![warn(missing_docs)]

pub mod chunk;
pub mod extract;
pub mod score;

use dossier_domain::traits::GenerationProvider;
use dossier_domain::{EvidenceSource, VerifiedClaim};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub use chunk::{chunk_text, MAX_CHUNKS_PER_SOURCE, MAX_CHUNK_CHARS};
pub use extract::{extract_claims, parse_claims, MIN_CLAIM_CHARS};
pub use score::{score_claim, tokenize, CLAIM_SET_FLOOR, MIN_TOKEN_CHARS, SNIPPET_MAX_CHARS};

/// Default bound on one claim-extraction call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The claim verifier.
pub struct Verifier {
    provider: Arc<dyn GenerationProvider>,
    timeout: Duration,
}

impl Verifier {
    /// Create a verifier over a generation capability.
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the claim-extraction timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extract claims from a draft answer. Never fails; empty means "skip
    /// verification".
    pub async fn extract_claims(&self, question: &str, draft: &str) -> Vec<String> {
        extract::extract_claims(&self.provider, question, draft, self.timeout).await
    }

    /// Score claims against the evidence. Deterministic.
    pub fn score_claims(&self, claims: &[String], sources: &[EvidenceSource]) -> Vec<VerifiedClaim> {
        claims
            .iter()
            .map(|claim| score::score_claim(claim, sources))
            .collect()
    }

    /// Extract and score in one step.
    pub async fn verify(
        &self,
        question: &str,
        draft: &str,
        sources: &[EvidenceSource],
    ) -> Vec<VerifiedClaim> {
        let claims = self.extract_claims(question, draft).await;
        if claims.is_empty() {
            info!("no claims extracted, verification skipped");
            return Vec::new();
        }
        let verified = self.score_claims(&claims, sources);
        info!(claims = verified.len(), "claims scored");
        verified
    }
}
