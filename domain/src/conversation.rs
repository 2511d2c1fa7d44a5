//! Conversation state: the model's working memory for one workflow run
//!
//! A [`Conversation`] is an append-only, strictly ordered log of [`Turn`]s.
//! The orchestration loop is its sole writer; capability adapters only return
//! values which the loop appends. No turn is ever edited, removed, or
//! reordered after being appended; corrections are expressed as new turns,
//! preserving a faithful audit trail of the run. The log is discarded when
//! the run ends; there is no cross-run persistence.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// One atomic entry in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Turn {
    /// Fixed operating instructions plus the capability list
    System { text: String },
    /// The user's prompt, possibly carrying an injected file-path annotation
    User { text: String },
    /// A model response: free text plus zero or more pending tool calls
    Assistant {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    /// The serialized outcome of one tool call, tagged with its identifier
    ToolResult {
        call_id: String,
        tool_name: String,
        payload: serde_json::Value,
    },
}

impl Turn {
    /// True if this is an assistant turn with no pending tool calls,
    /// the terminal condition of a run.
    pub fn is_final_answer(&self) -> bool {
        matches!(self, Turn::Assistant { tool_calls, .. } if tool_calls.is_empty())
    }
}

/// The ordered, append-only turn log of one workflow run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Seed a new conversation with exactly one system turn and one user
    /// turn, as every run starts.
    pub fn seeded(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            turns: vec![
                Turn::System {
                    text: system.into(),
                },
                Turn::User { text: user.into() },
            ],
        }
    }

    /// Append a model response.
    pub fn push_assistant(&mut self, text: impl Into<String>, tool_calls: Vec<ToolCall>) {
        self.turns.push(Turn::Assistant {
            text: text.into(),
            tool_calls,
        });
    }

    /// Append the outcome of one tool call. Results for calls issued in one
    /// assistant turn must be appended in the order the calls were emitted.
    pub fn push_tool_result(
        &mut self,
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        payload: serde_json::Value,
    ) {
        self.turns.push(Turn::ToolResult {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            payload,
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The text of the last assistant turn, if it was a final answer.
    pub fn final_answer(&self) -> Option<&str> {
        match self.turns.last() {
            Some(Turn::Assistant { text, tool_calls }) if tool_calls.is_empty() => Some(text),
            _ => None,
        }
    }
}
