//! Application layer for maestro
//!
//! Ports (abstract interfaces to the LLM service and the capability
//! registry) and the workflow use case that drives the orchestration loop.
//! Implementations of the ports live in the infrastructure layer.

pub mod config;
pub mod ports;
pub mod use_cases;

pub use config::ExecutionParams;
pub use ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
pub use ports::llm_gateway::{GatewayError, LlmGateway, LlmSession, ToolResultMessage};
pub use ports::tool_executor::ToolExecutorPort;
pub use ports::tool_schema::ToolSchemaPort;
pub use use_cases::run_workflow::{
    RunState, RunWorkflowInput, RunWorkflowOutput, RunWorkflowUseCase, WorkflowError,
    TIMEOUT_SENTINEL,
};
