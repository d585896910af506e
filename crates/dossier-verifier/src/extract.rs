//! Claim extraction from draft answers
//!
//! Asks the generation capability for 1-6 atomic factual claims as a JSON
//! string array. Extraction never fails: any generation error, timeout, or
//! contract violation yields an empty list, which callers read as "skip
//! verification".

use dossier_domain::claim::MAX_CLAIMS;
use dossier_domain::traits::GenerationProvider;
use dossier_domain::ChatMessage;
use dossier_llm::parse_json_block;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Minimum length of a usable claim, in characters.
pub const MIN_CLAIM_CHARS: usize = 8;

const CLAIM_INSTRUCTIONS: &str = r#"Extract the atomic factual claims from the draft answer below.
Respond with ONLY a JSON array of 1 to 6 strings. Each string is one
standalone, checkable factual statement from the draft, at least 8
characters long. Do not include opinions, hedges, or meta commentary.
No text outside the JSON array."#;

fn claim_messages(question: &str, draft: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(CLAIM_INSTRUCTIONS),
        ChatMessage::user(format!(
            "Question: {}\n\nDraft answer:\n---\n{}\n---",
            question, draft
        )),
    ]
}

/// Extract claims from a draft answer. Never fails.
pub async fn extract_claims(
    provider: &Arc<dyn GenerationProvider>,
    question: &str,
    draft: &str,
    timeout: Duration,
) -> Vec<String> {
    let messages = claim_messages(question, draft);

    let response = match tokio::time::timeout(timeout, provider.chat(&messages, 0.0)).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            warn!(error = %e, "claim extraction failed, skipping verification");
            return Vec::new();
        }
        Err(_) => {
            warn!("claim extraction timed out, skipping verification");
            return Vec::new();
        }
    };

    let claims = parse_claims(&response);
    debug!(count = claims.len(), "claims extracted");
    claims
}

/// Parse a claims response leniently: non-string or too-short entries are
/// skipped rather than failing the whole batch.
pub fn parse_claims(response: &str) -> Vec<String> {
    let parsed = match parse_json_block(response) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "claims response carried no usable JSON");
            return Vec::new();
        }
    };
    let Some(items) = parsed.as_array() else {
        warn!("claims response is not a JSON array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.as_str())
        .map(str::trim)
        .filter(|claim| claim.chars().count() >= MIN_CLAIM_CHARS)
        .map(str::to_string)
        .take(MAX_CLAIMS)
        .collect()
}
