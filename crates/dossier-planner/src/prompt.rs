//! Prompt construction for plan generation

use dossier_domain::ChatMessage;

const PLAN_INSTRUCTIONS: &str = r#"You are a research query planner.
Given a user question, produce between 2 and 6 web search queries that
together cover the question. Respond with ONLY a JSON object of this shape:

{
  "intents": [
    {"query": "...", "rationale": "..."},
    "a bare query string is also accepted"
  ],
  "must_include": ["term", ...],
  "time_sensitivity": "none" | "recent" | "current"
}

Rules:
- Each query must be a standalone web search, at least 3 characters.
- Prefer queries likely to hit primary or authoritative sources.
- Use "recent" or "current" only when freshness genuinely matters.
- No text outside the JSON object."#;

/// Build the chat messages for planning a question.
pub fn plan_messages(question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(PLAN_INSTRUCTIONS),
        ChatMessage::user(format!("Question: {}", question)),
    ]
}
