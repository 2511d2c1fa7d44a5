//! LLM Gateway port
//!
//! Defines the interface for communicating with the language-model service.
//! Tool-level failures never surface here: anything a [`GatewayError`]
//! carries is an infrastructure failure (service unreachable, malformed
//! response) and propagates out of the workflow to the caller.

use async_trait::async_trait;
use maestro_domain::{LlmResponse, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session with the given model, seeded with a system prompt.
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// Serialized outcome of one tool call, sent back to the model.
///
/// `call_id` must match the identifier the model assigned to the originating
/// call, so the model can correlate multiple results from one turn.
#[derive(Debug, Clone)]
pub struct ToolResultMessage {
    pub call_id: String,
    pub tool_name: String,
    /// Wire payload: `{"status":"success", …}` or `{"error": …}`
    pub payload: serde_json::Value,
}

/// An active LLM session.
///
/// The session owns the provider-side message history; the workflow's
/// [`Conversation`](maestro_domain::Conversation) is the caller-side audit
/// log of the same exchange.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a user message together with the advertised capability schemas;
    /// the response may contain text, tool calls, or both.
    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError>;

    /// Send the results of the previous turn's tool calls, in the order the
    /// calls were issued, and get the model's next response.
    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError>;
}
