//! Capability descriptors and tool calls

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The closed set of audio-processing capabilities.
///
/// The language model addresses capabilities by string name; that string
/// protocol is confined to the serialization boundary. Inside the system a
/// name is resolved to a `Capability` once, and all further dispatch is an
/// exhaustive `match`, so adding a capability is a compile-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Split an audio file into vocals/drums/bass/other stems (demucs)
    SeparateStems,
    /// Transcribe an audio file into a MIDI file (basic-pitch)
    AudioToMidi,
    /// Synthesize a short audio clip from a text prompt (musicgen)
    GenerateMusic,
}

impl Capability {
    /// All known capabilities, in advertisement order.
    pub const ALL: [Capability; 3] = [
        Capability::SeparateStems,
        Capability::AudioToMidi,
        Capability::GenerateMusic,
    ];

    /// The wire name the model uses to invoke this capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::SeparateStems => "separate_audio_stems",
            Capability::AudioToMidi => "audio_to_midi",
            Capability::GenerateMusic => "generate_music",
        }
    }

    /// Resolve a model-supplied name to a capability. `None` means the model
    /// asked for something the system does not provide; the caller reports
    /// that back as data, never as a crash.
    pub fn from_name(name: &str) -> Option<Capability> {
        match name {
            "separate_audio_stems" => Some(Capability::SeparateStems),
            "audio_to_midi" => Some(Capability::AudioToMidi),
            "generate_music" => Some(Capability::GenerateMusic),
            _ => None,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declarative metadata for one capability, serializable for the model.
///
/// Pure data, no behavior. The parameter schema is advisory to the model;
/// enforcement happens in the registry validator and the adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique wire name (e.g., "separate_audio_stems")
    pub name: String,
    /// Natural-language purpose, shown to the model
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "path")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// The set of capability descriptors advertised to the model.
///
/// Immutable after startup; shared read-only by the orchestration loop and
/// the schema encoder.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: Vec<ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A single requested invocation of a capability, as emitted by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the capability to call
    pub tool_name: String,
    /// Model-supplied arguments
    pub arguments: HashMap<String, serde_json::Value>,
    /// Opaque identifier assigned by the model API, used to correlate the
    /// tool-result turn with this request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            call_id: None,
        }
    }

    /// Build a call from a native tool-use content block.
    pub fn from_native(
        id: impl Into<String>,
        name: impl Into<String>,
        input: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            tool_name: name.into(),
            arguments: input,
            call_id: Some(id.into()),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_call_id(mut self, id: impl Into<String>) -> Self {
        self.call_id = Some(id.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_name_roundtrip() {
        for cap in Capability::ALL {
            assert_eq!(Capability::from_name(cap.as_str()), Some(cap));
        }
        assert_eq!(Capability::from_name("make_coffee"), None);
    }

    #[test]
    fn test_tool_definition_builder() {
        let tool = ToolDefinition::new("separate_audio_stems", "Split audio into stems")
            .with_parameter(
                ToolParameter::new("input_file_path", "Path to the audio file", true)
                    .with_type("path"),
            );

        assert_eq!(tool.name, "separate_audio_stems");
        assert_eq!(tool.parameters.len(), 1);
        assert!(tool.parameters[0].required);
        assert_eq!(tool.parameters[0].param_type, "path");
    }

    #[test]
    fn test_tool_spec_lookup() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("separate_audio_stems", "Separate"))
            .register(ToolDefinition::new("audio_to_midi", "Transcribe"));

        assert!(spec.get("separate_audio_stems").is_some());
        assert!(spec.get("audio_to_midi").is_some());
        assert!(spec.get("unknown").is_none());
        assert_eq!(spec.len(), 2);
    }

    #[test]
    fn test_tool_spec_preserves_registration_order() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("b_tool", "second letter"))
            .register(ToolDefinition::new("a_tool", "first letter"));

        let names: Vec<&str> = spec.names().collect();
        assert_eq!(names, vec!["b_tool", "a_tool"]);
    }

    #[test]
    fn test_tool_call_arguments() {
        let call = ToolCall::new("separate_audio_stems")
            .with_arg("input_file_path", "song.mp3")
            .with_call_id("call_0");

        assert_eq!(call.get_string("input_file_path"), Some("song.mp3"));
        assert_eq!(call.require_string("input_file_path").unwrap(), "song.mp3");
        assert!(call.require_string("missing").is_err());
        assert_eq!(call.call_id.as_deref(), Some("call_0"));
    }

    #[test]
    fn test_tool_call_from_native() {
        let input: HashMap<String, serde_json::Value> =
            [("prompt".to_string(), serde_json::json!("lofi beat"))]
                .into_iter()
                .collect();
        let call = ToolCall::from_native("call_abc", "generate_music", input);

        assert_eq!(call.tool_name, "generate_music");
        assert_eq!(call.call_id.as_deref(), Some("call_abc"));
        assert_eq!(call.get_string("prompt"), Some("lofi beat"));
    }
}
