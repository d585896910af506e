//! Deterministic lexical claim scoring
//!
//! No generation capability is involved. Tokens are lowercased, stripped of
//! non-alphanumeric characters, and discarded when shorter than
//! [`MIN_TOKEN_CHARS`]. A chunk's overlap with a claim is the number of
//! distinct claim tokens it contains, normalized by
//! `max(CLAIM_SET_FLOOR, |claim tokens|)` and clamped to 1.

use crate::chunk::chunk_text;
use dossier_domain::claim::MAX_CITATIONS;
use dossier_domain::{Citation, ClaimId, EvidenceSource, SupportLabel, VerifiedClaim};
use std::collections::HashSet;

/// Minimum token length kept after normalization.
pub const MIN_TOKEN_CHARS: usize = 4;

/// Floor on the claim-token denominator, so very short claims cannot reach
/// high scores from a couple of shared words.
pub const CLAIM_SET_FLOOR: usize = 8;

/// Maximum snippet length in a citation, in characters.
pub const SNIPPET_MAX_CHARS: usize = 280;

/// Normalize text into scoring tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .collect()
}

/// Overlap of one chunk against a claim token set, in `[0, 1]`.
fn chunk_overlap(chunk: &str, claim_tokens: &HashSet<String>) -> f64 {
    if claim_tokens.is_empty() {
        return 0.0;
    }
    let chunk_tokens: HashSet<String> = tokenize(chunk).into_iter().collect();
    let shared = chunk_tokens.intersection(claim_tokens).count();
    let denominator = CLAIM_SET_FLOOR.max(claim_tokens.len()) as f64;
    (shared as f64 / denominator).min(1.0)
}

/// Score one claim against all sources.
///
/// Keeps each source's best chunk, cites the top three sources by score,
/// and takes the maximum as the claim score (rounded to two decimals). A
/// claim no source overlaps at all scores 0 with no citations.
pub fn score_claim(claim: &str, sources: &[EvidenceSource]) -> VerifiedClaim {
    let claim_tokens: HashSet<String> = tokenize(claim).into_iter().collect();

    let mut best_per_source: Vec<(f64, Citation)> = Vec::new();
    for source in sources {
        let mut best: Option<(f64, String)> = None;
        for chunk in chunk_text(&source.text) {
            let overlap = chunk_overlap(&chunk, &claim_tokens);
            if best.as_ref().map_or(true, |(score, _)| overlap > *score) {
                best = Some((overlap, chunk));
            }
        }
        if let Some((score, chunk)) = best {
            if score > 0.0 {
                best_per_source.push((
                    score,
                    Citation {
                        source_url: source.url.clone(),
                        snippet: truncate_snippet(&chunk),
                    },
                ));
            }
        }
    }

    // Stable sort: ties keep discovery order.
    best_per_source.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    best_per_source.truncate(MAX_CITATIONS);

    let raw_score = best_per_source.first().map_or(0.0, |(score, _)| *score);
    let score = (raw_score * 100.0).round() / 100.0;

    VerifiedClaim {
        id: ClaimId::new(),
        text: claim.to_string(),
        label: SupportLabel::from_score(score),
        score,
        evidence: best_per_source.into_iter().map(|(_, c)| c).collect(),
    }
}

fn truncate_snippet(snippet: &str) -> String {
    let flat = snippet.split_whitespace().collect::<Vec<_>>().join(" ");
    flat.chars().take(SNIPPET_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(url: &str, text: &str) -> EvidenceSource {
        EvidenceSource {
            url: url.to_string(),
            title: "title".to_string(),
            domain: dossier_domain::normalized_domain(url),
            excerpt: String::new(),
            text: text.to_string(),
            content_hash: format!("hash-{}", url),
        }
    }

    #[test]
    fn test_tokenize_normalizes() {
        let tokens = tokenize("The QUICK-brown fox, (jumped) over 12345!");
        // "the" and "fox" are shorter than 4 chars after stripping; "over" stays.
        assert_eq!(tokens, vec!["quickbrown", "jumped", "over", "12345"]);
    }

    #[test]
    fn test_tokenize_drops_short_tokens() {
        assert!(tokenize("a an the of to is").is_empty());
    }

    #[test]
    fn test_full_overlap_scores_one() {
        // Eight distinct long tokens, all present in the chunk: 8 / max(8, 8) = 1.
        let claim = "chlorophyll molecules absorb photons inside plant thylakoid membranes";
        let text = "Chlorophyll molecules absorb photons inside plant thylakoid membranes efficiently.";
        let verified = score_claim(claim, &[source("https://a.com", text)]);
        assert_eq!(verified.score, 1.0);
        assert_eq!(verified.label, SupportLabel::Supported);
        assert_eq!(verified.evidence.len(), 1);
    }

    #[test]
    fn test_no_overlap_scores_zero_with_no_citations() {
        let verified = score_claim(
            "quantum chromodynamics predicts gluon confinement",
            &[source("https://a.com", "Gardening tips for growing tomatoes in spring.")],
        );
        assert_eq!(verified.score, 0.0);
        assert_eq!(verified.label, SupportLabel::Unsupported);
        assert!(verified.evidence.is_empty());
    }

    #[test]
    fn test_floor_denominator_for_short_claims() {
        // Claim has 4 scoring tokens, all matched: 4 / max(8, 4) = 0.5.
        let claim = "mitochondria produce cellular energy";
        let text = "Mitochondria produce cellular energy for the organism.";
        let verified = score_claim(claim, &[source("https://a.com", text)]);
        assert_eq!(verified.score, 0.5);
        assert_eq!(verified.label, SupportLabel::Weak);
    }

    #[test]
    fn test_score_in_unit_interval() {
        let claim = "some claim with several moderately long tokens involved";
        let text = claim.repeat(50);
        let verified = score_claim(claim, &[source("https://a.com", &text)]);
        assert!(verified.score >= 0.0 && verified.score <= 1.0);
    }

    #[test]
    fn test_top_three_citations_best_first() {
        let claim = "chlorophyll molecules absorb photons inside plant thylakoid membranes";
        let full = "Chlorophyll molecules absorb photons inside plant thylakoid membranes.";
        let partial = "Chlorophyll molecules absorb photons there.";
        let faint = "Thylakoid structures exist.";
        let none = "Entirely unrelated gardening advice column.";

        let sources = vec![
            source("https://faint.com", faint),
            source("https://none.com", none),
            source("https://full.com", full),
            source("https://partial.com", partial),
        ];
        let verified = score_claim(claim, &sources);

        assert_eq!(verified.evidence.len(), 3);
        assert_eq!(verified.evidence[0].source_url, "https://full.com");
        assert_eq!(verified.evidence[1].source_url, "https://partial.com");
        assert_eq!(verified.evidence[2].source_url, "https://faint.com");
    }

    #[test]
    fn test_best_chunk_per_source_wins() {
        let claim = "chlorophyll molecules absorb photons inside plant thylakoid membranes";
        let text = format!(
            "{}\n\n{}",
            "An unrelated opening paragraph about publication history. ".repeat(20),
            "Chlorophyll molecules absorb photons inside plant thylakoid membranes."
        );
        let verified = score_claim(claim, &[source("https://a.com", &text)]);
        assert_eq!(verified.score, 1.0);
        assert!(verified.evidence[0].snippet.contains("Chlorophyll"));
    }

    #[test]
    fn test_snippet_truncated() {
        let claim = "chlorophyll molecules absorb photons inside plant thylakoid membranes";
        let long_chunk = format!(
            "Chlorophyll molecules absorb photons inside plant thylakoid membranes. {}",
            "Additional supporting sentence. ".repeat(40)
        );
        let verified = score_claim(claim, &[source("https://a.com", &long_chunk)]);
        assert!(verified.evidence[0].snippet.chars().count() <= SNIPPET_MAX_CHARS);
    }

    #[test]
    fn test_deterministic() {
        let claim = "mitochondria produce cellular energy";
        let sources = vec![source("https://a.com", "Mitochondria produce cellular energy.")];
        let first = score_claim(claim, &sources);
        let second = score_claim(claim, &sources);
        assert_eq!(first.score, second.score);
        assert_eq!(first.label, second.label);
        assert_eq!(first.evidence, second.evidence);
    }
}
