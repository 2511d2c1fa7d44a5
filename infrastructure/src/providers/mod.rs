//! LLM provider adapters

pub mod deepseek;

pub use deepseek::DeepseekGateway;
