//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! are deserialized directly. Example:
//!
//! ```toml
//! [provider]
//! base_url = "https://api.deepseek.com"
//! api_key_env = "DEEPSEEK_API_KEY"
//! model = "deepseek-chat"
//!
//! [workspace]
//! root = "workspace"
//!
//! [agent]
//! max_turns = 8
//!
//! [tools]
//! timeout_secs = 600
//! demucs_command = "demucs"
//!
//! [logging]
//! conversation_log = "workspace/conversation.jsonl"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// LLM provider settings
    pub provider: FileProviderConfig,
    /// Shared filesystem workspace settings
    pub workspace: FileWorkspaceConfig,
    /// Orchestration loop settings
    pub agent: FileAgentConfig,
    /// External capability command settings
    pub tools: FileToolsConfig,
    /// Transcript logging settings
    pub logging: FileLoggingConfig,
}

/// LLM provider configuration (`[provider]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the OpenAI-compatible chat-completions service
    pub base_url: String,
    /// Environment variable the API key is read from
    pub api_key_env: String,
    /// Model identifier sent on every request
    pub model: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            model: "deepseek-chat".to_string(),
        }
    }
}

/// Workspace configuration (`[workspace]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkspaceConfig {
    /// Root directory all capability outputs live under
    pub root: PathBuf,
}

impl Default for FileWorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("workspace"),
        }
    }
}

/// Orchestration loop configuration (`[agent]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Maximum model invocations per run before the run times out
    pub max_turns: usize,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self { max_turns: 8 }
    }
}

/// External capability commands (`[tools]` section)
///
/// The commands are program names resolved via `PATH`, overridable for
/// environments where the tools are installed under different names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Per-call deadline for external invocations, in seconds
    pub timeout_secs: u64,
    /// Source-separation command (demucs)
    pub demucs_command: String,
    /// Audio-to-MIDI transcription command (basic-pitch)
    pub basic_pitch_command: String,
    /// Text-to-audio generation command (musicgen runner)
    pub musicgen_command: String,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 600,
            demucs_command: "demucs".to_string(),
            basic_pitch_command: "basic-pitch".to_string(),
            musicgen_command: "musicgen".to_string(),
        }
    }
}

/// Transcript logging configuration (`[logging]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Where to write the JSONL conversation transcript; `None` disables it
    pub conversation_log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.provider.base_url, "https://api.deepseek.com");
        assert_eq!(config.provider.model, "deepseek-chat");
        assert_eq!(config.workspace.root, PathBuf::from("workspace"));
        assert_eq!(config.agent.max_turns, 8);
        assert_eq!(config.tools.timeout_secs, 600);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[provider]
model = "deepseek-reasoner"

[agent]
max_turns = 4
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.model, "deepseek-reasoner");
        // Defaults fill the rest
        assert_eq!(config.provider.base_url, "https://api.deepseek.com");
        assert_eq!(config.agent.max_turns, 4);
        assert_eq!(config.tools.demucs_command, "demucs");
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
base_url = "http://localhost:8080"
api_key_env = "LOCAL_KEY"
model = "local-model"

[workspace]
root = "/tmp/maestro"

[tools]
timeout_secs = 30
demucs_command = "/opt/audio/demucs"

[logging]
conversation_log = "/tmp/maestro/run.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.provider.api_key_env, "LOCAL_KEY");
        assert_eq!(config.workspace.root, PathBuf::from("/tmp/maestro"));
        assert_eq!(config.tools.timeout_secs, 30);
        assert_eq!(config.tools.demucs_command, "/opt/audio/demucs");
        assert_eq!(
            config.logging.conversation_log,
            Some(PathBuf::from("/tmp/maestro/run.jsonl"))
        );
    }
}
