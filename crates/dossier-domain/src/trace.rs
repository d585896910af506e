//! Trace events - append-only telemetry for a run
//!
//! Events are recorded in emission order. For concurrent retrieval work this
//! approximates completion order, not submission order.

use serde::{Deserialize, Serialize};

/// One step of planning or retrieval telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// The planner produced these intents.
    Planner {
        /// Intent queries, in plan order.
        intents: Vec<String>,
    },
    /// A search query completed.
    Search {
        /// The query text.
        query: String,
        /// Number of results returned.
        result_count: usize,
    },
    /// A page fetch completed (only recorded for collected sources).
    Fetch {
        /// The fetched URL.
        url: String,
        /// HTTP status; 0 means total failure.
        status: u16,
    },
    /// A candidate URL was chosen during selection.
    Select {
        /// The chosen URL.
        chosen: String,
        /// Why it was chosen.
        reason: String,
    },
    /// Elapsed wall-clock time for the retrieval phase.
    Timing {
        /// Milliseconds elapsed.
        ms: u64,
    },
}
