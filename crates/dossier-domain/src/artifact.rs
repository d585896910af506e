//! Cacheable run artifacts and their cache keys

use crate::claim::VerifiedClaim;
use crate::source::EvidenceSource;
use crate::trace::TraceEvent;
use serde::{Deserialize, Serialize};

/// Maximum length of the normalized question inside a cache key.
pub const NORMALIZED_QUESTION_MAX: usize = 300;

/// Which pipeline variant a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Plan, retrieve, draft. No claim verification.
    Normal,
    /// Normal plus claim extraction, scoring, and a grounded rewrite.
    Verified,
}

impl RunMode {
    /// Stable string form, used in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Normal => "normal",
            RunMode::Verified => "verified",
        }
    }

    /// How many sources a first retrieval pass must yield before the
    /// orchestrator widens the search.
    pub fn required_min_sources(&self) -> usize {
        match self {
            RunMode::Normal => 2,
            RunMode::Verified => 3,
        }
    }
}

/// The complete, cacheable output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// The final answer text.
    pub final_answer: String,
    /// Evidence sources backing the answer.
    pub sources: Vec<EvidenceSource>,
    /// Telemetry of the run.
    pub trace: Vec<TraceEvent>,
    /// Scored claims; empty when verification did not run.
    pub claims: Vec<VerifiedClaim>,
}

/// Normalize a question for cache keying.
///
/// Lowercases, collapses whitespace runs to single spaces, and truncates to
/// [`NORMALIZED_QUESTION_MAX`] characters.
///
/// # Examples
///
/// ```
/// use dossier_domain::normalize_question;
///
/// assert_eq!(normalize_question("  What   IS\tRust? "), "what is rust?");
/// ```
pub fn normalize_question(question: &str) -> String {
    let collapsed = question
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    collapsed.chars().take(NORMALIZED_QUESTION_MAX).collect()
}

/// Build the cache key for a `(mode, question)` pair.
///
/// # Examples
///
/// ```
/// use dossier_domain::{artifact_key, RunMode};
///
/// let a = artifact_key(RunMode::Normal, "What is Rust?");
/// let b = artifact_key(RunMode::Normal, "what   is rust?");
/// assert_eq!(a, b);
/// assert_ne!(a, artifact_key(RunMode::Verified, "What is Rust?"));
/// ```
pub fn artifact_key(mode: RunMode, question: &str) -> String {
    format!("artifact:{}:{}", mode.as_str(), normalize_question(question))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_and_lowercases() {
        assert_eq!(normalize_question("A  B\n\nC"), "a b c");
    }

    #[test]
    fn test_normalize_truncates() {
        let long = "word ".repeat(200);
        let normalized = normalize_question(&long);
        assert_eq!(normalized.chars().count(), NORMALIZED_QUESTION_MAX);
    }

    #[test]
    fn test_key_distinguishes_modes() {
        let q = "same question";
        assert_ne!(
            artifact_key(RunMode::Normal, q),
            artifact_key(RunMode::Verified, q)
        );
    }

    #[test]
    fn test_required_min_sources() {
        assert_eq!(RunMode::Normal.required_min_sources(), 2);
        assert_eq!(RunMode::Verified.required_min_sources(), 3);
    }

    #[test]
    fn test_artifact_round_trip() {
        let artifact = Artifact {
            final_answer: "answer".to_string(),
            sources: Vec::new(),
            trace: vec![TraceEvent::Timing { ms: 10 }],
            claims: Vec::new(),
        };
        let json = serde_json::to_string(&artifact).unwrap();
        let back: Artifact = serde_json::from_str(&json).unwrap();
        assert_eq!(artifact, back);
    }
}
