//! Dossier Domain Layer
//!
//! Core types and capability seams for the research & verification pipeline.
//! This crate defines the value objects that flow through a run (plans,
//! search results, evidence sources, claims, trace events, artifacts) and
//! the trait interfaces behind which all infrastructure lives.
//!
//! ## Key Concepts
//!
//! - **Plan**: a bounded set of search intents derived from a question
//! - **Evidence Source**: a fetched, extracted web page, unique by content hash
//! - **Claim**: an atomic factual statement with a support verdict and score
//! - **Trace Event**: append-only telemetry of planning and retrieval steps
//! - **Artifact**: the cacheable bundle of answer, sources, trace, and claims
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations live in other crates
//!   (`dossier-llm`, `dossier-web`, `dossier-cache`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact;
pub mod chat;
pub mod claim;
pub mod plan;
pub mod source;
pub mod trace;
pub mod traits;

// Re-exports for convenience
pub use artifact::{artifact_key, normalize_question, Artifact, RunMode};
pub use chat::{ChatMessage, ChatRole};
pub use claim::{Citation, ClaimId, SupportLabel, VerifiedClaim};
pub use plan::{Intent, Plan, TimeSensitivity};
pub use source::{normalized_domain, EvidenceSource, SearchResult};
pub use trace::TraceEvent;
