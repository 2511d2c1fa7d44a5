//! Port for structured conversation logging.
//!
//! Separate from `tracing`-based diagnostics: tracing carries human-readable
//! operational messages, while this port captures the run transcript in a
//! machine-readable form (one JSONL line per event in the default
//! implementation).

use serde_json::Value;

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "assistant_turn", "tool_result").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events.
///
/// `log` is intentionally synchronous and non-fallible so transcript
/// problems can never disrupt a run; implementations swallow I/O errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
