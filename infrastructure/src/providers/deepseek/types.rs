//! Wire format conversion for the chat-completions API.
//!
//! Translates between the provider-neutral shapes the rest of the system
//! uses (`name`/`description`/`input_schema` tool triples, [`LlmResponse`])
//! and the OpenAI-compatible request/response JSON.

use maestro_application::GatewayError;
use maestro_domain::{ContentBlock, LlmResponse, StopReason};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Convert provider-neutral tool schemas to the API's function-tool format:
/// `{"type": "function", "function": {name, description, parameters}}`.
pub fn to_api_tools(tools: &[Value]) -> Vec<Value> {
    tools
        .iter()
        .map(|t| {
            json!({
                "type": "function",
                "function": {
                    "name": t["name"],
                    "description": t["description"],
                    "parameters": t["input_schema"],
                }
            })
        })
        .collect()
}

/// Parse one chat-completions response body into an [`LlmResponse`] plus the
/// raw assistant message (kept verbatim for the session history).
pub fn parse_response(body: &Value) -> Result<(LlmResponse, Value), GatewayError> {
    let message = body
        .pointer("/choices/0/message")
        .ok_or_else(|| {
            GatewayError::MalformedResponse("response has no choices[0].message".to_string())
        })?
        .clone();

    let mut content = Vec::new();

    if let Some(text) = message["content"].as_str()
        && !text.is_empty()
    {
        content.push(ContentBlock::Text(text.to_string()));
    }

    if let Some(calls) = message["tool_calls"].as_array() {
        for call in calls {
            let id = call["id"].as_str().unwrap_or_default().to_string();
            let name = call
                .pointer("/function/name")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    GatewayError::MalformedResponse("tool call without a function name".to_string())
                })?
                .to_string();
            let raw_args = call
                .pointer("/function/arguments")
                .and_then(Value::as_str)
                .unwrap_or("{}");
            let input: HashMap<String, Value> = serde_json::from_str(raw_args).map_err(|e| {
                GatewayError::MalformedResponse(format!(
                    "tool call arguments are not a JSON object: {e}"
                ))
            })?;
            content.push(ContentBlock::ToolUse { id, name, input });
        }
    }

    let stop_reason = body
        .pointer("/choices/0/finish_reason")
        .and_then(Value::as_str)
        .map(|r| match r {
            "stop" => StopReason::EndTurn,
            "tool_calls" => StopReason::ToolUse,
            "length" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        });

    let model = body["model"].as_str().map(str::to_string);

    Ok((
        LlmResponse {
            content,
            stop_reason,
            model,
        },
        message,
    ))
}
