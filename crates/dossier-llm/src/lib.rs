//! Dossier LLM Provider Layer
//!
//! Implementations of the `GenerationProvider` trait from `dossier-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing
//! - `OllamaProvider`: local Ollama chat API integration
//!
//! # Examples
//!
//! ```
//! use dossier_llm::MockProvider;
//! use dossier_domain::traits::GenerationProvider;
//! use dossier_domain::ChatMessage;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let reply = provider
//!     .chat(&[ChatMessage::user("hi")], 0.2)
//!     .await
//!     .unwrap();
//! assert_eq!(reply, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod json;
pub mod ollama;

use async_trait::async_trait;
use dossier_domain::traits::{GenerationError, GenerationProvider, TokenSink};
use dossier_domain::ChatMessage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub use json::{extract_json_block, parse_json_block};
pub use ollama::OllamaProvider;

/// One scripted mock turn: a canned response or an injected failure.
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(String),
}

/// Mock generation provider for deterministic testing.
///
/// Returns pre-configured responses without any network calls. Responses can
/// be scripted as a FIFO queue; once the queue is drained the default
/// response (or a permanent failure) is returned.
///
/// # Examples
///
/// ```
/// use dossier_llm::MockProvider;
/// use dossier_domain::traits::GenerationProvider;
/// use dossier_domain::ChatMessage;
///
/// # tokio_test::block_on(async {
/// let provider = MockProvider::new("default");
/// provider.push_reply("first");
/// provider.push_failure("search backend down");
///
/// let msgs = [ChatMessage::user("q")];
/// assert_eq!(provider.chat(&msgs, 0.0).await.unwrap(), "first");
/// assert!(provider.chat(&msgs, 0.0).await.is_err());
/// assert_eq!(provider.chat(&msgs, 0.0).await.unwrap(), "default");
/// assert_eq!(provider.call_count(), 3);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    always_fail: bool,
    script: Arc<Mutex<VecDeque<Scripted>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a provider with a fixed response for all calls.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            always_fail: false,
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a provider that fails every call.
    ///
    /// Used to test never-raising callers (planner, claim extraction).
    pub fn failing() -> Self {
        Self {
            default_response: String::new(),
            always_fail: true,
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a scripted reply for the next unscripted call.
    pub fn push_reply(&self, response: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Reply(response.into()));
    }

    /// Queue a scripted failure for the next unscripted call.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(message.into()));
    }

    /// Number of chat calls made so far (streaming included).
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count.
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    fn next_response(&self) -> Result<String, GenerationError> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(scripted) = self.script.lock().unwrap().pop_front() {
            return match scripted {
                Scripted::Reply(text) => Ok(text),
                Scripted::Fail(message) => Err(GenerationError::Communication(message)),
            };
        }

        if self.always_fail {
            return Err(GenerationError::Communication("mock failure".to_string()));
        }

        Ok(self.default_response.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    async fn chat(
        &self,
        _messages: &[ChatMessage],
        _temperature: f32,
    ) -> Result<String, GenerationError> {
        self.next_response()
    }

    async fn stream_chat(
        &self,
        _messages: &[ChatMessage],
        _temperature: f32,
        on_token: TokenSink<'_>,
    ) -> Result<String, GenerationError> {
        let text = self.next_response()?;
        // Deliver word-sized chunks so callers exercise ordered assembly.
        for chunk in text.split_inclusive(' ') {
            on_token(chunk);
        }
        Ok(text)
    }
}
