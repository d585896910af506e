//! Query plans - bounded sets of search intents derived from a question

use serde::{Deserialize, Serialize};

/// Minimum number of intents a valid plan carries.
pub const MIN_INTENTS: usize = 2;

/// Maximum number of intents a valid plan carries.
pub const MAX_INTENTS: usize = 6;

/// Minimum length of a single intent query, in characters.
pub const MIN_INTENT_LEN: usize = 3;

/// A single search intent derived from the user's question.
///
/// Intents are ephemeral: they drive candidate selection and are discarded
/// after retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// The search query to issue.
    pub query: String,

    /// Optional rationale for why this intent was planned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Intent {
    /// Create an intent with no rationale.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            rationale: None,
        }
    }
}

/// How time-sensitive the question is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSensitivity {
    /// Timeless topic; freshness does not matter.
    None,
    /// Prefer sources from the recent past.
    Recent,
    /// Prefer the newest available sources.
    Current,
}

impl Default for TimeSensitivity {
    fn default() -> Self {
        TimeSensitivity::None
    }
}

/// A validated query plan.
///
/// Plans are produced by the planner. An invalid or failed generation never
/// surfaces to callers; they receive [`Plan::fallback`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Search intents, between [`MIN_INTENTS`] and [`MAX_INTENTS`].
    pub intents: Vec<Intent>,

    /// Terms the answer must cover, if any.
    #[serde(default)]
    pub must_include: Vec<String>,

    /// Time sensitivity of the question.
    #[serde(default)]
    pub time_sensitivity: TimeSensitivity,
}

impl Plan {
    /// The deterministic fallback plan for a question.
    ///
    /// Used whenever plan generation fails, times out, or violates the
    /// schema. Always yields exactly three intents.
    ///
    /// # Examples
    ///
    /// ```
    /// use dossier_domain::Plan;
    ///
    /// let plan = Plan::fallback("rust borrow checker");
    /// assert_eq!(plan.intents.len(), 3);
    /// assert_eq!(plan.intents[0].query, "rust borrow checker");
    /// assert!(plan.must_include.is_empty());
    /// ```
    pub fn fallback(question: &str) -> Self {
        let question = question.trim();
        Self {
            intents: vec![
                Intent::new(question),
                Intent::new(format!("{} primary source", question)),
                Intent::new(format!("{} overview", question)),
            ],
            must_include: Vec::new(),
            time_sensitivity: TimeSensitivity::None,
        }
    }

    /// Validate the plan against the schema bounds.
    pub fn validate(&self) -> Result<(), String> {
        if self.intents.len() < MIN_INTENTS || self.intents.len() > MAX_INTENTS {
            return Err(format!(
                "plan must carry {}..={} intents, got {}",
                MIN_INTENTS,
                MAX_INTENTS,
                self.intents.len()
            ));
        }
        for intent in &self.intents {
            if intent.query.trim().len() < MIN_INTENT_LEN {
                return Err(format!("intent query too short: {:?}", intent.query));
            }
        }
        Ok(())
    }
}
