//! HTML-to-readable-text extraction
//!
//! Lightweight tag-stripping extraction: no browser, no DOM. Block elements
//! become paragraph breaks (blank lines), script and style content is
//! dropped, common entities are decoded, and the readable text is
//! fingerprinted with SHA-256 for deduplication.

use dossier_domain::normalized_domain;
use dossier_domain::traits::{ExtractError, ExtractedDoc, TextExtractor};
use sha2::{Digest, Sha256};

/// Maximum excerpt length, in characters.
pub const EXCERPT_MAX_CHARS: usize = 300;

/// Readable-text extractor implementing the extraction contract.
#[derive(Debug, Default, Clone)]
pub struct ReadabilityExtractor;

impl ReadabilityExtractor {
    /// Create an extractor.
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for ReadabilityExtractor {
    fn extract(&self, html: &str, url: &str) -> Result<ExtractedDoc, ExtractError> {
        if html.trim().is_empty() {
            return Err(ExtractError::Malformed("empty document".to_string()));
        }

        let text = strip_tags(html);
        if text.trim().is_empty() {
            return Err(ExtractError::Empty);
        }

        let title = find_title(html).unwrap_or_else(|| normalized_domain(url));

        Ok(ExtractedDoc {
            title,
            excerpt: make_excerpt(&text),
            content_hash: content_hash(&text),
            text,
        })
    }
}

/// Hex-encoded SHA-256 of the readable text.
pub fn content_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut hex = String::with_capacity(64);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Find the document title, if present.
fn find_title(html: &str) -> Option<String> {
    let lower = html.to_lowercase();
    let open = lower.find("<title")?;
    let open_end = html[open..].find('>')? + open + 1;
    let close = lower[open_end..].find("</title>")? + open_end;
    let title = html[open_end..close].trim();
    if title.is_empty() {
        None
    } else {
        Some(decode_entities(title))
    }
}

/// First sentence-ish slice of the text, capped at [`EXCERPT_MAX_CHARS`].
fn make_excerpt(text: &str) -> String {
    let first_block = text.split("\n\n").find(|b| !b.trim().is_empty()).unwrap_or(text);
    let flat = first_block.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_MAX_CHARS {
        flat
    } else {
        flat.chars().take(EXCERPT_MAX_CHARS).collect()
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

/// Whether a closed tag ends a block of readable text.
fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "/p"
            | "br"
            | "br/"
            | "div"
            | "/div"
            | "li"
            | "/li"
            | "tr"
            | "/tr"
            | "section"
            | "/section"
            | "article"
            | "/article"
            | "h1" | "/h1" | "h2" | "/h2" | "h3" | "/h3" | "h4" | "/h4" | "h5" | "/h5" | "h6"
            | "/h6"
    )
}

/// Strip tags from HTML, preserving paragraph structure as blank lines.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len() / 4);
    let mut in_tag = false;
    let mut in_hidden = false; // inside <script> or <style>
    let mut tag = String::new();

    for ch in html.chars() {
        if ch == '<' {
            in_tag = true;
            tag.clear();
            continue;
        }
        if ch == '>' && in_tag {
            in_tag = false;
            let name: String = tag
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '/')
                .collect::<String>()
                .to_lowercase();

            match name.as_str() {
                "script" | "style" | "noscript" | "title" => in_hidden = true,
                "/script" | "/style" | "/noscript" | "/title" => in_hidden = false,
                _ if is_block_tag(&name) => out.push_str("\n\n"),
                _ => {}
            }
            continue;
        }
        if in_tag {
            tag.push(ch);
            continue;
        }
        if in_hidden {
            continue;
        }
        out.push(ch);
    }

    let decoded = decode_entities(&out);

    // Normalize: trim each line, collapse runs of blank lines to one.
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    for line in decoded.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html>
        <head><title>Photosynthesis &amp; Light</title>
        <style>body { color: red; }</style></head>
        <body>
            <script>var tracking = true;</script>
            <h1>Photosynthesis</h1>
            <p>Plants convert light energy into chemical energy.</p>
            <p>Chlorophyll absorbs mostly red and blue light.</p>
        </body>
    </html>"#;

    fn extract(html: &str) -> ExtractedDoc {
        ReadabilityExtractor::new()
            .extract(html, "https://www.example.com/photo")
            .unwrap()
    }

    #[test]
    fn test_extracts_title() {
        assert_eq!(extract(SAMPLE).title, "Photosynthesis & Light");
    }

    #[test]
    fn test_strips_script_and_style() {
        let doc = extract(SAMPLE);
        assert!(!doc.text.contains("tracking"));
        assert!(!doc.text.contains("color: red"));
    }

    #[test]
    fn test_paragraphs_separated_by_blank_lines() {
        let doc = extract(SAMPLE);
        let paragraphs: Vec<&str> = doc.text.split("\n\n").collect();
        assert!(paragraphs.len() >= 3, "text: {:?}", doc.text);
        assert!(doc.text.contains("Plants convert light energy"));
        assert!(doc.text.contains("Chlorophyll absorbs"));
    }

    #[test]
    fn test_title_falls_back_to_domain() {
        let doc = ReadabilityExtractor::new()
            .extract("<html><body><p>No title here at all.</p></body></html>", "https://www.example.com/x")
            .unwrap();
        assert_eq!(doc.title, "example.com");
    }

    #[test]
    fn test_empty_document_is_error() {
        let result = ReadabilityExtractor::new().extract("   ", "https://example.com");
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_markup_only_document_is_empty_error() {
        let result =
            ReadabilityExtractor::new().extract("<html><body></body></html>", "https://example.com");
        assert!(matches!(result, Err(ExtractError::Empty)));
    }

    #[test]
    fn test_content_hash_is_stable_and_distinct() {
        let a = content_hash("some readable text");
        let b = content_hash("some readable text");
        let c = content_hash("different text");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_identical_text_from_different_urls_same_hash() {
        let html = "<html><title>T</title><body><p>Same body text.</p></body></html>";
        let a = ReadabilityExtractor::new().extract(html, "https://a.com/1").unwrap();
        let b = ReadabilityExtractor::new().extract(html, "https://b.com/2").unwrap();
        assert_eq!(a.content_hash, b.content_hash);
    }

    #[test]
    fn test_excerpt_capped() {
        let body = format!("<p>{}</p>", "word ".repeat(200));
        let doc = extract(&format!("<html><title>T</title><body>{}</body></html>", body));
        assert!(doc.excerpt.chars().count() <= EXCERPT_MAX_CHARS);
    }

    #[test]
    fn test_entities_decoded() {
        let doc = extract("<html><title>T</title><body><p>Fish &amp; chips &gt; salad</p></body></html>");
        assert!(doc.text.contains("Fish & chips > salad"));
    }
}
