//! Infrastructure layer for maestro
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the DeepSeek chat-completions gateway, the three
//! capability adapters and their registry, configuration file loading, and
//! the JSONL conversation transcript logger.

pub mod config;
pub mod logging;
pub mod providers;
pub mod tools;
pub mod workspace;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::DeepseekGateway;
pub use tools::{
    CapabilityRegistry, JsonSchemaToolConverter, MusicGenerator, StemSeparator, Transcriber,
    default_tool_spec,
};
