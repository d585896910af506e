//! Extract JSON payloads from prose-wrapped model output
//!
//! JSON-mode responses frequently arrive wrapped in markdown fences or
//! explanatory text. The first balanced `{...}` or `[...]` substring is the
//! payload; everything around it is discarded before parsing.

/// Find the first balanced JSON object or array in `response`.
///
/// The scan respects string literals and escape sequences, so braces inside
/// strings do not affect nesting. Returns `None` when no balanced payload
/// exists.
///
/// # Examples
///
/// ```
/// use dossier_llm::extract_json_block;
///
/// let wrapped = "Here is the plan:\n```json\n{\"intents\": []}\n```";
/// assert_eq!(extract_json_block(wrapped), Some("{\"intents\": []}"));
///
/// assert_eq!(extract_json_block("no json here"), None);
/// ```
pub fn extract_json_block(response: &str) -> Option<&str> {
    let bytes = response.as_bytes();
    let start = bytes.iter().position(|&b| b == b'{' || b == b'[')?;
    let open = bytes[start];
    let close = if open == b'{' { b'}' } else { b']' };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            _ if b == open => depth += 1,
            _ if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(&response[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract and parse the first balanced JSON payload in `response`.
pub fn parse_json_block(response: &str) -> Result<serde_json::Value, String> {
    let block = extract_json_block(response).ok_or_else(|| "no JSON payload found".to_string())?;
    serde_json::from_str(block).map_err(|e| format!("JSON parse error: {}", e))
}
