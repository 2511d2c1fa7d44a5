//! Domain layer for maestro
//!
//! This crate contains the core business logic, entities, and value objects
//! of the audio-processing agent. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Capabilities
//!
//! A capability is one external, black-box audio-processing operation the
//! model can invoke by name with structured arguments: stem separation,
//! audio-to-MIDI transcription, or text-to-audio generation. The set is
//! closed ([`Capability`]); the string protocol only exists at the
//! serialization boundary facing the language model.
//!
//! ## Workflow Run
//!
//! One execution of the orchestration loop for a single user prompt. The run
//! owns an append-only [`Conversation`] of [`Turn`]s and terminates when the
//! model answers in plain text or the turn ceiling is reached.

pub mod conversation;
pub mod core;
pub mod prompt;
pub mod session;
pub mod tool;
pub mod util;
pub mod workspace;

// Re-export commonly used types
pub use conversation::{Conversation, Turn};
pub use core::{error::DomainError, model::Model};
pub use prompt::WorkflowPromptTemplate;
pub use session::response::{ContentBlock, LlmResponse, StopReason};
pub use tool::{
    entities::{Capability, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
pub use workspace::WorkspaceLayout;
