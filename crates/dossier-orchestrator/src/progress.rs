//! Progress events streamed to the caller during a run
//!
//! Delivery is observational only. Events are emitted in order, but a run
//! never blocks on, or fails because of, a consumer that stopped listening.

use dossier_domain::VerifiedClaim;
use tokio::sync::mpsc::UnboundedSender;

/// One phase transition or payload chunk of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The run was accepted.
    Started,
    /// Query planning began.
    Planning,
    /// Retrieval began.
    Searching,
    /// Answer drafting began.
    Drafting,
    /// Claim verification began.
    Verifying,
    /// An ordered chunk of the answer text.
    AnswerChunk(String),
    /// The scored claims, emitted once when verification ran.
    Claims(Vec<VerifiedClaim>),
    /// The run finished successfully.
    Done,
    /// The run terminated with an error. Always the last event when present.
    Error(String),
}

/// Best-effort progress sink. A missing or closed consumer is silently
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    sender: Option<UnboundedSender<ProgressEvent>>,
}

impl Progress {
    /// A sink that drops every event.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// A sink that forwards events to `sender`.
    pub fn new(sender: UnboundedSender<ProgressEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Emit an event. Send failures are ignored.
    pub fn emit(&self, event: ProgressEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }
}
