//! Ollama Provider Implementation
//!
//! Integration with Ollama's local chat API.
//!
//! # Features
//!
//! - Async HTTP communication with the `/api/chat` endpoint
//! - Configurable endpoint and model
//! - Retry logic with exponential backoff for non-streaming calls
//! - NDJSON streaming with ordered token delivery
//!
//! # Examples
//!
//! ```no_run
//! use dossier_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3");
//! ```

use async_trait::async_trait;
use dossier_domain::traits::{GenerationError, GenerationProvider, TokenSink};
use dossier_domain::{ChatMessage, ChatRole};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for a complete LLM request (120 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of retry attempts for non-streaming calls.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama chat provider for local LLM inference.
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
    #[allow(dead_code)]
    done: bool,
}

#[derive(Deserialize)]
struct OllamaStreamChunk {
    #[serde(default)]
    message: Option<OllamaMessage>,
    #[serde(default)]
    done: bool,
}

fn to_ollama_messages(messages: &[ChatMessage]) -> Vec<OllamaMessage> {
    messages
        .iter()
        .map(|m| OllamaMessage {
            role: match m.role {
                ChatRole::System => "system".to_string(),
                ChatRole::User => "user".to_string(),
                ChatRole::Assistant => "assistant".to_string(),
            },
            content: m.content.clone(),
        })
        .collect()
}

impl OllamaProvider {
    /// Create a new Ollama provider.
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("default reqwest client");

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a provider against the default local endpoint.
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.endpoint)
    }

    async fn chat_once(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, GenerationError> {
        let body = OllamaChatRequest {
            model: &self.model,
            messages: to_ollama_messages(messages),
            stream: false,
            options: OllamaOptions { temperature },
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Communication(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GenerationError::Communication(format!(
                "HTTP {} from Ollama",
                response.status()
            )));
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        Ok(parsed.message.content)
    }
}

#[async_trait]
impl GenerationProvider for OllamaProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, GenerationError> {
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            match self.chat_once(messages, temperature).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!(attempt, error = %e, "ollama chat attempt failed");
                    last_error = Some(e);
                    if attempt + 1 < self.max_retries {
                        // Exponential backoff: 1s, 2s, 4s, ...
                        let backoff = Duration::from_secs(1 << attempt.min(4));
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| GenerationError::Communication("no attempts made".to_string())))
    }

    async fn stream_chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        on_token: TokenSink<'_>,
    ) -> Result<String, GenerationError> {
        let body = OllamaChatRequest {
            model: &self.model,
            messages: to_ollama_messages(messages),
            stream: true,
            options: OllamaOptions { temperature },
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Communication(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GenerationError::Communication(format!(
                "HTTP {} from Ollama",
                response.status()
            )));
        }

        // Ollama streams NDJSON: one chunk object per line. Network chunks
        // may split a line, or even a multi-byte character, so the buffer
        // holds raw bytes and only complete lines are decoded.
        let mut stream = response.bytes_stream();
        let mut line_buffer: Vec<u8> = Vec::new();
        let mut full_text = String::new();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| GenerationError::Communication(e.to_string()))?;
            line_buffer.extend_from_slice(&bytes);

            for line in drain_lines(&mut line_buffer) {
                if line.is_empty() {
                    continue;
                }
                let parsed: OllamaStreamChunk = serde_json::from_str(&line)
                    .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
                if let Some(message) = parsed.message {
                    if !message.content.is_empty() {
                        on_token(&message.content);
                        full_text.push_str(&message.content);
                    }
                }
                if parsed.done {
                    debug!(chars = full_text.len(), "ollama stream complete");
                    return Ok(full_text);
                }
            }
        }

        Ok(full_text)
    }
}

/// Split complete lines off the front of `buffer`.
///
/// Any trailing partial line, which may end mid-character, stays in the
/// buffer for the next network chunk.
fn drain_lines(buffer: &mut Vec<u8>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(newline) = buffer.iter().position(|&b| b == b'\n') {
        let line: Vec<u8> = buffer.drain(..=newline).collect();
        lines.push(String::from_utf8_lossy(&line).trim().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_mapping() {
        let messages = vec![
            ChatMessage::system("s"),
            ChatMessage::user("u"),
            ChatMessage::assistant("a"),
        ];
        let mapped = to_ollama_messages(&messages);
        assert_eq!(mapped[0].role, "system");
        assert_eq!(mapped[1].role, "user");
        assert_eq!(mapped[2].role, "assistant");
    }

    #[test]
    fn test_chat_url() {
        let provider = OllamaProvider::new("http://localhost:11434", "llama3");
        assert_eq!(provider.chat_url(), "http://localhost:11434/api/chat");
    }

    #[test]
    fn test_drain_lines_keeps_partial_line() {
        let mut buffer = b"first line\nsecond ".to_vec();
        assert_eq!(drain_lines(&mut buffer), vec!["first line".to_string()]);
        assert_eq!(buffer, b"second ");

        buffer.extend_from_slice(b"half\n");
        assert_eq!(drain_lines(&mut buffer), vec!["second half".to_string()]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_drain_lines_preserves_character_split_across_chunks() {
        // "héllo" with the two-byte 'é' split between network chunks.
        let line = r#"{"message":{"role":"assistant","content":"héllo"},"done":false}"#;
        let bytes = line.as_bytes();
        let split = line.find('é').unwrap() + 1; // inside the 'é' sequence

        let mut buffer = bytes[..split].to_vec();
        assert!(drain_lines(&mut buffer).is_empty());

        buffer.extend_from_slice(&bytes[split..]);
        buffer.push(b'\n');
        let lines = drain_lines(&mut buffer);
        assert_eq!(lines, vec![line.to_string()]);

        let chunk: OllamaStreamChunk = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(chunk.message.unwrap().content, "héllo");
    }

    #[test]
    fn test_stream_chunk_parsing() {
        let line = r#"{"message":{"role":"assistant","content":"Hel"},"done":false}"#;
        let chunk: OllamaStreamChunk = serde_json::from_str(line).unwrap();
        assert_eq!(chunk.message.unwrap().content, "Hel");
        assert!(!chunk.done);

        let terminal = r#"{"done":true}"#;
        let chunk: OllamaStreamChunk = serde_json::from_str(terminal).unwrap();
        assert!(chunk.message.is_none());
        assert!(chunk.done);
    }
}
