//! Evidence chunking
//!
//! Source text is split on blank-line boundaries into paragraphs, then
//! consecutive paragraphs are greedily merged into chunks of roughly
//! [`MAX_CHUNK_CHARS`] characters. A single oversized paragraph becomes its
//! own chunk rather than being split mid-sentence.

/// Approximate upper bound on one chunk, in characters.
pub const MAX_CHUNK_CHARS: usize = 900;

/// Maximum chunks scored per source.
pub const MAX_CHUNKS_PER_SOURCE: usize = 40;

/// Chunk source text for scoring.
pub fn chunk_text(text: &str) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    for paragraph in paragraphs {
        if chunks.len() >= MAX_CHUNKS_PER_SOURCE {
            break;
        }
        if !current.is_empty()
            && current.chars().count() + paragraph.chars().count() > MAX_CHUNK_CHARS
        {
            chunks.push(std::mem::take(&mut current));
            if chunks.len() >= MAX_CHUNKS_PER_SOURCE {
                break;
            }
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(&paragraph);
    }
    if !current.is_empty() && chunks.len() < MAX_CHUNKS_PER_SOURCE {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_single_chunk() {
        let chunks = chunk_text("One paragraph.\n\nAnother paragraph.");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("One paragraph."));
        assert!(chunks[0].contains("Another paragraph."));
    }

    #[test]
    fn test_merge_respects_limit() {
        let paragraph = "x".repeat(400);
        let text = format!("{p}\n\n{p}\n\n{p}", p = paragraph);
        let chunks = chunk_text(&text);
        // 400 + 400 fits in one chunk; the third overflows into a second.
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].chars().count() <= MAX_CHUNK_CHARS);
    }

    #[test]
    fn test_oversized_paragraph_kept_whole() {
        let text = "y".repeat(1_500);
        let chunks = chunk_text(&text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chars().count(), 1_500);
    }

    #[test]
    fn test_chunk_cap() {
        let text = (0..200)
            .map(|i| format!("{} {}", "paragraph".repeat(60), i))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunks = chunk_text(&text);
        assert!(chunks.len() <= MAX_CHUNKS_PER_SOURCE);
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("").is_empty());
        assert!(chunk_text("\n\n\n").is_empty());
    }

    #[test]
    fn test_blank_lines_with_whitespace_split_paragraphs() {
        let chunks = chunk_text("first\n   \nsecond");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("first\n\nsecond") || chunks[0].contains("first"));
    }
}
