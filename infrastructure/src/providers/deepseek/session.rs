//! Chat-completions LLM session
//!
//! Manages conversation history locally since the chat-completions API is
//! stateless: every request carries the full message list. Assistant
//! messages are stored in their raw wire form so tool-call ids round-trip
//! exactly as the service issued them.

use super::types;
use async_trait::async_trait;
use maestro_application::{GatewayError, LlmSession, ToolResultMessage};
use maestro_domain::{LlmResponse, Model};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::debug;

pub struct DeepseekSession {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: Model,
    /// Full wire-format message history, seeded with the system turn
    messages: Mutex<Vec<Value>>,
    /// API-format tool list (set when send_with_tools is first called)
    tools: Mutex<Option<Vec<Value>>>,
}

impl DeepseekSession {
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        api_key: String,
        model: Model,
        system_prompt: &str,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
            messages: Mutex::new(vec![json!({
                "role": "system",
                "content": system_prompt,
            })]),
            tools: Mutex::new(None),
        }
    }

    /// Append the given messages, call the API with the full history, and
    /// append the assistant's reply to the history.
    async fn send_messages(&self, new_messages: Vec<Value>) -> Result<LlmResponse, GatewayError> {
        let mut messages = self.messages.lock().await;
        messages.extend(new_messages);

        let mut request = json!({
            "model": self.model.as_str(),
            "messages": *messages,
        });

        let tools = self.tools.lock().await;
        if let Some(ref tools) = *tools {
            request["tools"] = json!(tools);
            request["tool_choice"] = json!("auto");
        }
        drop(tools);

        debug!(
            model = %self.model,
            messages = messages.len(),
            "Calling chat-completions API"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        if !status.is_success() {
            let detail = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("no error detail");
            return Err(GatewayError::RequestFailed(format!(
                "chat-completions request failed with {status}: {detail}"
            )));
        }

        let (llm_response, assistant_message) = types::parse_response(&body)?;
        messages.push(assistant_message);

        Ok(llm_response)
    }
}

#[async_trait]
impl LlmSession for DeepseekSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[Value],
    ) -> Result<LlmResponse, GatewayError> {
        if !tools.is_empty() {
            *self.tools.lock().await = Some(types::to_api_tools(tools));
        }

        self.send_messages(vec![json!({
            "role": "user",
            "content": content,
        })])
        .await
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError> {
        let messages = results
            .iter()
            .map(|r| {
                json!({
                    "role": "tool",
                    "tool_call_id": r.call_id,
                    "name": r.tool_name,
                    "content": r.payload.to_string(),
                })
            })
            .collect();

        self.send_messages(messages).await
    }
}
