//! Error types for the orchestrator

use dossier_domain::traits::GenerationError;
use thiserror::Error;

/// Errors a pipeline run can surface to its caller.
///
/// The planner, claim extraction, and page fetch degrade locally and never
/// appear here. What does appear: bad input, a failing search or generation
/// capability during drafting, and retrieval that produced nothing to draft
/// from.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// The question was empty or otherwise unusable.
    #[error("invalid question: {0}")]
    InvalidQuestion(String),

    /// A required capability (search, generation) failed mid-run.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Generation output violated its JSON contract.
    #[error("parse failure: {0}")]
    Parse(String),

    /// The retrieval budget expired before any usable evidence was collected.
    #[error("retrieval deadline exceeded with no usable evidence")]
    DeadlineExceeded,

    /// No artifact exists for the requested key.
    #[error("artifact not found: {0}")]
    NotFound(String),

    /// The artifact cache failed.
    #[error("cache error: {0}")]
    Cache(String),
}

impl From<GenerationError> for OrchestratorError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::InvalidResponse(msg) => OrchestratorError::Parse(msg),
            other => OrchestratorError::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_response_maps_to_parse() {
        let e: OrchestratorError =
            GenerationError::InvalidResponse("not json".to_string()).into();
        assert!(matches!(e, OrchestratorError::Parse(_)));
    }

    #[test]
    fn test_timeout_maps_to_upstream() {
        let e: OrchestratorError = GenerationError::Timeout.into();
        assert!(matches!(e, OrchestratorError::Upstream(_)));
    }
}
