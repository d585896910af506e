//! Evidence pack - the capped view of the sources given to generation

use crate::config::OrchestratorConfig;
use dossier_domain::EvidenceSource;

/// One source trimmed for prompt inclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedSource {
    /// Source URL, untruncated.
    pub url: String,
    /// Title, capped.
    pub title: String,
    /// Excerpt, capped.
    pub excerpt: String,
    /// Leading body text, capped.
    pub body: String,
}

/// The evidence handed to the generation capability.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvidencePack {
    /// Packed sources, at most `pack_max_sources`.
    pub sources: Vec<PackedSource>,
}

impl EvidencePack {
    /// Build a pack from the collected sources, applying the configured caps.
    pub fn build(sources: &[EvidenceSource], config: &OrchestratorConfig) -> Self {
        let sources = sources
            .iter()
            .take(config.pack_max_sources)
            .map(|s| PackedSource {
                url: s.url.clone(),
                title: truncate_chars(&s.title, config.pack_title_chars),
                excerpt: truncate_chars(&s.excerpt, config.pack_excerpt_chars),
                body: truncate_chars(&s.text, config.pack_body_chars),
            })
            .collect();
        Self { sources }
    }

    /// Render the pack as a numbered block for prompt text.
    pub fn render(&self) -> String {
        if self.sources.is_empty() {
            return "No sources were collected.".to_string();
        }
        let mut out = String::new();
        for (i, source) in self.sources.iter().enumerate() {
            out.push_str(&format!(
                "[{}] {} ({})\nExcerpt: {}\nText: {}\n\n",
                i + 1,
                source.title,
                source.url,
                source.excerpt,
                source.body
            ));
        }
        out.trim_end().to_string()
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
