//! Configuration loading and file format

mod file_config;
mod loader;

pub use file_config::{
    FileAgentConfig, FileConfig, FileLoggingConfig, FileProviderConfig, FileToolsConfig,
    FileWorkspaceConfig,
};
pub use loader::ConfigLoader;
