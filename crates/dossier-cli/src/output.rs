//! Terminal output helpers.
//!
//! Answer text streams to stdout; phase notices go to stderr so piped
//! output stays clean.

use dossier_domain::{EvidenceSource, TraceEvent, VerifiedClaim};
use std::io::{self, Write};

/// Print one answer chunk without a trailing newline.
pub fn print_chunk(chunk: &str) {
    print!("{}", chunk);
    let _ = io::stdout().flush();
}

/// Print a phase notice to stderr.
pub fn print_phase(phase: &str) {
    eprintln!("[{}]", phase);
}

/// Print the source list after the answer.
pub fn print_sources(sources: &[EvidenceSource]) {
    println!("\nSources:");
    for (i, source) in sources.iter().enumerate() {
        println!("  [{}] {} - {}", i + 1, source.title, source.url);
    }
}

/// Print the claim verdicts after the answer.
pub fn print_claims(claims: &[VerifiedClaim]) {
    println!("\nClaims:");
    for claim in claims {
        println!("  [{} {:.2}] {}", claim.label.as_str(), claim.score, claim.text);
        for citation in &claim.evidence {
            println!("      {} :: {}", citation.source_url, citation.snippet);
        }
    }
}

/// Print the retrieval trace as pretty JSON.
pub fn print_trace(trace: &[TraceEvent]) -> anyhow::Result<()> {
    println!("\nTrace:");
    println!("{}", serde_json::to_string_pretty(trace)?);
    Ok(())
}
