//! Prompt construction for drafting and grounded rewriting

use crate::pack::EvidencePack;
use dossier_domain::{ChatMessage, VerifiedClaim};

const DRAFT_INSTRUCTIONS: &str = "You are a research assistant. Answer the user's question using \
only the numbered sources provided. Cite sources inline by their URL. If the sources do not \
cover part of the question, say so rather than guessing. Write plain prose, no markdown headers.";

const REWRITE_INSTRUCTIONS: &str = "You are a research assistant revising a draft answer after \
fact-checking. Follow these rules strictly:\n\
- Prefer claims marked supported.\n\
- Flag claims marked weak as uncertain.\n\
- Never assert claims marked unsupported as fact.\n\
- Cite at least 3 distinct sources by URL when 3 or more are available.\n\
Rewrite the answer accordingly, using only the numbered sources provided.";

/// Messages for the initial draft.
pub fn draft_messages(question: &str, pack: &EvidencePack) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(DRAFT_INSTRUCTIONS),
        ChatMessage::user(format!(
            "Sources:\n\n{}\n\nQuestion: {}",
            pack.render(),
            question
        )),
    ]
}

/// Messages for the grounded rewrite after verification.
pub fn rewrite_messages(
    question: &str,
    draft: &str,
    pack: &EvidencePack,
    claims: &[VerifiedClaim],
) -> Vec<ChatMessage> {
    let mut claim_block = String::new();
    for claim in claims {
        claim_block.push_str(&format!(
            "- [{} {:.2}] {}\n",
            claim.label.as_str(),
            claim.score,
            claim.text
        ));
    }

    vec![
        ChatMessage::system(REWRITE_INSTRUCTIONS),
        ChatMessage::user(format!(
            "Sources:\n\n{}\n\nDraft answer:\n{}\n\nFact-check results:\n{}\nQuestion: {}",
            pack.render(),
            draft,
            claim_block,
            question
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrchestratorConfig;
    use dossier_domain::{ChatRole, Citation, ClaimId, SupportLabel};

    fn claim(text: &str, label: SupportLabel, score: f64) -> VerifiedClaim {
        VerifiedClaim {
            id: ClaimId::new(),
            text: text.to_string(),
            label,
            score,
            evidence: vec![Citation {
                source_url: "https://a.com".to_string(),
                snippet: "snippet".to_string(),
            }],
        }
    }

    #[test]
    fn test_draft_messages_shape() {
        let pack = EvidencePack::build(&[], &OrchestratorConfig::default());
        let messages = draft_messages("what is rust", &pack);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[1].content.contains("Question: what is rust"));
    }

    #[test]
    fn test_rewrite_messages_include_verdicts() {
        let pack = EvidencePack::build(&[], &OrchestratorConfig::default());
        let claims = vec![
            claim("Rust has no garbage collector", SupportLabel::Supported, 0.88),
            claim("Rust was released in 1999", SupportLabel::Unsupported, 0.0),
        ];
        let messages = rewrite_messages("q", "draft text", &pack, &claims);
        let body = &messages[1].content;
        assert!(body.contains("[supported 0.88] Rust has no garbage collector"));
        assert!(body.contains("[unsupported 0.00] Rust was released in 1999"));
        assert!(body.contains("Draft answer:\ndraft text"));
    }
}
