//! Dossier Planner
//!
//! Turns a free-text question into a bounded set of search intents.
//!
//! The planner asks the generation capability for a JSON plan, validates it
//! against the schema (2-6 intents, each at least 3 characters, a known
//! time-sensitivity value), and degrades to [`Plan::fallback`] on any
//! failure: generation error, timeout, or schema violation.
//!
//! # Guarantee
//!
//! [`Planner::plan`] never fails and never panics. Callers always receive a
//! usable plan.

#![warn(missing_docs)]

mod parse;
mod prompt;

use dossier_domain::traits::GenerationProvider;
use dossier_domain::Plan;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub use parse::parse_plan;

/// Default bound on one planning call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Temperature for plan generation. Low: plans should be boring.
const PLAN_TEMPERATURE: f32 = 0.1;

/// The query planner.
pub struct Planner {
    provider: Arc<dyn GenerationProvider>,
    timeout: Duration,
}

impl Planner {
    /// Create a planner over a generation capability.
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the planning timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Plan retrieval for a question. Never fails.
    pub async fn plan(&self, question: &str) -> Plan {
        let question = question.trim();
        let messages = prompt::plan_messages(question);

        let response =
            match tokio::time::timeout(self.timeout, self.provider.chat(&messages, PLAN_TEMPERATURE))
                .await
            {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    warn!(error = %e, "plan generation failed, using fallback plan");
                    return Plan::fallback(question);
                }
                Err(_) => {
                    warn!("plan generation timed out, using fallback plan");
                    return Plan::fallback(question);
                }
            };

        match parse_plan(&response) {
            Ok(plan) => {
                debug!(intents = plan.intents.len(), "plan accepted");
                plan
            }
            Err(e) => {
                warn!(error = %e, "plan rejected, using fallback plan");
                Plan::fallback(question)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_domain::TimeSensitivity;
    use dossier_llm::MockProvider;

    fn planner_with(provider: MockProvider) -> Planner {
        Planner::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn test_valid_plan_is_used() {
        let provider = MockProvider::new(
            r#"{"intents": [{"query": "rust ownership", "rationale": "core topic"},
                            "rust borrow checker rules"],
                "must_include": ["lifetimes"],
                "time_sensitivity": "none"}"#,
        );
        let plan = planner_with(provider).plan("explain rust ownership").await;
        assert_eq!(plan.intents.len(), 2);
        assert_eq!(plan.intents[0].query, "rust ownership");
        assert_eq!(plan.intents[0].rationale.as_deref(), Some("core topic"));
        assert_eq!(plan.intents[1].query, "rust borrow checker rules");
        assert_eq!(plan.must_include, vec!["lifetimes"]);
    }

    #[tokio::test]
    async fn test_failing_generation_yields_exact_fallback() {
        let plan = planner_with(MockProvider::failing())
            .plan("what is photosynthesis")
            .await;
        assert_eq!(plan.intents.len(), 3);
        assert_eq!(plan.intents[0].query, "what is photosynthesis");
        assert_eq!(plan.intents[1].query, "what is photosynthesis primary source");
        assert_eq!(plan.intents[2].query, "what is photosynthesis overview");
        assert!(plan.must_include.is_empty());
        assert_eq!(plan.time_sensitivity, TimeSensitivity::None);
    }

    #[tokio::test]
    async fn test_non_json_response_yields_fallback() {
        let plan = planner_with(MockProvider::new("I cannot produce a plan right now."))
            .plan("some question")
            .await;
        assert_eq!(plan.intents.len(), 3);
    }

    #[tokio::test]
    async fn test_schema_violation_yields_fallback() {
        // Seven intents exceeds the schema bound.
        let intents: Vec<String> = (0..7).map(|i| format!("\"query number {}\"", i)).collect();
        let response = format!("{{\"intents\": [{}]}}", intents.join(","));
        let plan = planner_with(MockProvider::new(response)).plan("q about things").await;
        assert_eq!(plan.intents.len(), 3);
        assert_eq!(plan.intents[0].query, "q about things");
    }

    #[tokio::test]
    async fn test_prose_wrapped_plan_is_accepted() {
        let provider = MockProvider::new(
            "Here is your plan:\n```json\n{\"intents\": [\"alpha query\", \"beta query\"]}\n```",
        );
        let plan = planner_with(provider).plan("anything").await;
        assert_eq!(plan.intents.len(), 2);
        assert_eq!(plan.intents[0].query, "alpha query");
    }
}
