//! Structured LLM responses for the tool-calling protocol.
//!
//! The chat-completions service returns either plain text or a list of
//! requested tool calls for the current turn. [`LlmResponse`] models both
//! as an ordered sequence of [`ContentBlock`]s, so the orchestration loop
//! can branch on [`has_tool_calls`](LlmResponse::has_tool_calls) without
//! knowing anything about the provider's wire format.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of content within an LLM response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text content block from the model.
    Text(String),

    /// A tool invocation request from the model.
    ToolUse {
        /// API-assigned identifier for correlating the eventual result
        id: String,
        /// Capability name as emitted by the model
        name: String,
        /// Structured arguments parsed from the model's JSON
        input: HashMap<String, serde_json::Value>,
    },
}

impl ContentBlock {
    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response, the model is done.
    EndTurn,
    /// The model wants tools executed and their results returned.
    ToolUse,
    /// Hit the token limit; response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

/// A structured response from the LLM for one turn.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Content blocks in the response (text and/or tool use), in order.
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the API).
    pub model: Option<String>,
}

impl LlmResponse {
    /// Wrap a plain text response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all `ToolUse` blocks as [`ToolCall`]s, preserving the order
    /// the model emitted them.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::from_native(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if the response contains any tool use requests.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_is_final() {
        let response = LlmResponse::from_text("All four stems are ready.");
        assert_eq!(response.text_content(), "All four stems are ready.");
        assert!(!response.has_tool_calls());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
    }

    #[test]
    fn tool_calls_preserve_emission_order() {
        let response = LlmResponse {
            content: vec![
                ContentBlock::Text("Separating, then transcribing.".to_string()),
                ContentBlock::ToolUse {
                    id: "call_0".to_string(),
                    name: "separate_audio_stems".to_string(),
                    input: [("input_file_path".to_string(), serde_json::json!("song.mp3"))]
                        .into_iter()
                        .collect(),
                },
                ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: "audio_to_midi".to_string(),
                    input: HashMap::new(),
                },
            ],
            stop_reason: Some(StopReason::ToolUse),
            model: Some("deepseek-chat".to_string()),
        };

        assert!(response.has_tool_calls());
        assert_eq!(response.text_content(), "Separating, then transcribing.");

        let calls = response.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].tool_name, "separate_audio_stems");
        assert_eq!(calls[0].call_id.as_deref(), Some("call_0"));
        assert_eq!(calls[1].tool_name, "audio_to_midi");
        assert_eq!(calls[1].call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn empty_response() {
        let response = LlmResponse {
            content: vec![],
            stop_reason: None,
            model: None,
        };
        assert_eq!(response.text_content(), "");
        assert!(!response.has_tool_calls());
    }
}
