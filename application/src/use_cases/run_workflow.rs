//! Run Workflow use case
//!
//! The orchestration loop: seed a conversation, ask the model what to do,
//! execute whatever capability calls it requests, feed the outcomes back,
//! and repeat until the model answers in plain text or the turn ceiling is
//! reached. The loop is domain-agnostic; everything audio-specific lives in
//! the capability descriptors and the adapters behind [`ToolExecutorPort`].

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, ToolResultMessage};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use maestro_domain::{Conversation, Model, WorkflowPromptTemplate};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Fixed result string for a run that hit the turn ceiling. Distinct from
/// any model-generated text so callers can tell the two apart.
pub const TIMEOUT_SENTINEL: &str =
    "Error: task aborted after reaching the maximum number of processing turns.";

/// Errors that cross the orchestrator boundary.
///
/// Tool-level failures never appear here; they are fed back to the model as
/// tool-result turns. Only infrastructure faults abort a run.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("LLM gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Model returned an empty response with no tool calls")]
    EmptyResponse,
}

/// State of the orchestration loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Awaiting the model's decision
    Planning,
    /// Running the tool calls requested in one model turn
    Executing,
    /// The model returned plain text; the run succeeded
    Done,
    /// Turn ceiling reached while the model was still requesting tools
    TimedOut,
}

/// Input for one workflow run.
#[derive(Debug, Clone)]
pub struct RunWorkflowInput {
    /// The user's free-text prompt
    pub prompt: String,
    /// Path of an uploaded audio file, injected into the user turn as a
    /// context annotation
    pub uploaded_file: Option<String>,
    /// Model to use
    pub model: Model,
    /// Loop control parameters
    pub execution: ExecutionParams,
}

impl RunWorkflowInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            uploaded_file: None,
            model: Model::default(),
            execution: ExecutionParams::default(),
        }
    }

    pub fn with_uploaded_file(mut self, path: impl Into<String>) -> Self {
        self.uploaded_file = Some(path.into());
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }
}

/// Output of one workflow run.
#[derive(Debug)]
pub struct RunWorkflowOutput {
    /// The final answer, or [`TIMEOUT_SENTINEL`] if the run timed out
    pub answer: String,
    /// Terminal state of the run (`Done` or `TimedOut`)
    pub state: RunState,
    /// The full audit-trail conversation of the run
    pub conversation: Conversation,
    /// How many times the model was invoked
    pub model_invocations: usize,
}

impl RunWorkflowOutput {
    pub fn timed_out(&self) -> bool {
        self.state == RunState::TimedOut
    }
}

/// Use case driving the bounded tool-calling loop.
pub struct RunWorkflowUseCase {
    gateway: Arc<dyn LlmGateway>,
    executor: Arc<dyn ToolExecutorPort>,
    schema: Arc<dyn ToolSchemaPort>,
    logger: Arc<dyn ConversationLogger>,
}

impl RunWorkflowUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        executor: Arc<dyn ToolExecutorPort>,
        schema: Arc<dyn ToolSchemaPort>,
        logger: Arc<dyn ConversationLogger>,
    ) -> Self {
        Self {
            gateway,
            executor,
            schema,
            logger,
        }
    }

    /// Run one workflow to completion.
    ///
    /// Returns `Ok` for both `Done` and `TimedOut` runs; `Err` only for
    /// infrastructure failures (gateway unreachable, malformed responses).
    pub async fn execute(&self, input: RunWorkflowInput) -> Result<RunWorkflowOutput, WorkflowError> {
        let spec = self.executor.tool_spec();
        let system_prompt = WorkflowPromptTemplate::system(spec);
        let user_text = WorkflowPromptTemplate::user(&input.prompt, input.uploaded_file.as_deref());
        let tools_schema = self.schema.all_tools_schema(spec);

        let mut conversation = Conversation::seeded(&system_prompt, &user_text);
        let max_turns = input.execution.max_turns.max(1);

        info!(model = %input.model, max_turns, "Starting workflow run");
        self.logger.log(ConversationEvent::new(
            "run_started",
            json!({
                "model": input.model.as_str(),
                "max_turns": max_turns,
                "uploaded_file": input.uploaded_file,
                "prompt": input.prompt,
            }),
        ));

        let session = self.gateway.create_session(&input.model, &system_prompt).await?;

        // First model invocation: the user turn plus the capability schemas.
        let mut response = session.send_with_tools(&user_text, &tools_schema).await?;
        let mut model_invocations = 1usize;
        let mut synthetic_id = 0usize;

        loop {
            let text = response.text_content();
            let calls = response.tool_calls();
            conversation.push_assistant(&text, calls.clone());
            self.logger.log(ConversationEvent::new(
                "assistant_turn",
                json!({
                    "invocation": model_invocations,
                    "text": text,
                    "tool_calls": calls.iter().map(|c| c.tool_name.as_str()).collect::<Vec<_>>(),
                }),
            ));

            if calls.is_empty() {
                if text.trim().is_empty() {
                    warn!("Model returned neither text nor tool calls");
                    return Err(WorkflowError::EmptyResponse);
                }
                info!(model_invocations, "Workflow run complete");
                self.logger.log(ConversationEvent::new(
                    "run_finished",
                    json!({ "state": "done", "model_invocations": model_invocations }),
                ));
                return Ok(RunWorkflowOutput {
                    answer: text,
                    state: RunState::Done,
                    conversation,
                    model_invocations,
                });
            }

            // Executing: run the requested calls sequentially, in the order
            // the model emitted them. A failed call does not stop the batch;
            // its error payload goes back to the model like any other result.
            let mut results = Vec::with_capacity(calls.len());
            for call in &calls {
                let call_id = match call.call_id.as_deref() {
                    Some(id) if !id.is_empty() => id.to_string(),
                    _ => {
                        synthetic_id += 1;
                        format!("call-{synthetic_id}")
                    }
                };
                debug!(tool = %call.tool_name, call_id = %call_id, "Executing tool call");

                let result = self.executor.execute(call).await;
                let payload = result.payload();
                if let Some(err) = result.error() {
                    warn!(tool = %call.tool_name, code = %err.code, "Tool call failed: {}", err.message);
                }

                conversation.push_tool_result(&call_id, &call.tool_name, payload.clone());
                self.logger.log(ConversationEvent::new(
                    "tool_result",
                    json!({
                        "call_id": call_id,
                        "tool_name": call.tool_name,
                        "payload": payload,
                    }),
                ));
                results.push(ToolResultMessage {
                    call_id,
                    tool_name: call.tool_name.clone(),
                    payload,
                });
            }

            // Ceiling check happens before the next invocation, so a run is
            // never charged for a model call it did not make.
            if model_invocations >= max_turns {
                warn!(max_turns, "Turn ceiling reached, aborting run");
                self.logger.log(ConversationEvent::new(
                    "run_finished",
                    json!({ "state": "timed_out", "model_invocations": model_invocations }),
                ));
                return Ok(RunWorkflowOutput {
                    answer: TIMEOUT_SENTINEL.to_string(),
                    state: RunState::TimedOut,
                    conversation,
                    model_invocations,
                });
            }

            response = session.send_tool_results(&results).await?;
            model_invocations += 1;
        }
    }
}
