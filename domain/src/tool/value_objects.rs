//! Capability result and error value objects
//!
//! Every capability invocation produces exactly one [`ToolResult`], which is
//! either a verified success carrying domain fields (file paths, track maps)
//! or an error carrying a message. [`ToolResult::payload`] renders the wire
//! shape fed back to the model:
//!
//! ```text
//! success:  {"status": "success", "tracks": {...}}
//! failure:  {"error": "Expected output file not found: ..."}
//! ```
//!
//! Exactly one of the two shapes is ever populated; consumers branch on the
//! presence of the `error` field and never assume success fields exist.

use serde::{Deserialize, Serialize};

/// Error that occurred during capability execution.
///
/// The code classifies the failure for logging and tests; the model only
/// ever sees the rendered message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "OUTPUT_MISSING")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The model requested a capability that is not registered.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("Tool not found: {}", name.into()))
    }

    /// Model-supplied arguments failed validation.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    /// The external process/model failed (non-zero exit, internal fault).
    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    /// The external process claimed success but an expected artifact is
    /// missing on disk (trust-but-verify).
    pub fn output_missing(path: impl Into<String>) -> Self {
        Self::new(
            "OUTPUT_MISSING",
            format!("Expected output file not found: {}", path.into()),
        )
    }

    /// The external invocation exceeded its deadline.
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of one capability invocation.
///
/// Constructed only through [`success`](Self::success) and
/// [`failure`](Self::failure), so the success/error exclusivity invariant
/// holds by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the capability that was executed
    pub tool_name: String,
    /// Whether the execution was a verified success
    pub success: bool,
    /// Capability-specific output fields (success only)
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub fields: serde_json::Map<String, serde_json::Value>,
    /// Error information (failure only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResult {
    /// Create a verified-success result. `fields` must be a JSON object of
    /// capability-specific outputs; anything else is treated as empty.
    pub fn success(tool_name: impl Into<String>, fields: serde_json::Value) -> Self {
        let fields = match fields {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Self {
            tool_name: tool_name.into(),
            success: true,
            fields,
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            fields: serde_json::Map::new(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Get one success field by name
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    /// Render the wire payload fed back to the model as a tool-result turn.
    pub fn payload(&self) -> serde_json::Value {
        match &self.error {
            Some(err) => serde_json::json!({ "error": err.message }),
            None => {
                let mut map = serde_json::Map::new();
                map.insert("status".to_string(), serde_json::json!("success"));
                for (k, v) in &self.fields {
                    map.insert(k.clone(), v.clone());
                }
                serde_json::Value::Object(map)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_payload_shape() {
        let result = ToolResult::success(
            "separate_audio_stems",
            serde_json::json!({
                "tracks": {
                    "vocals": "/w/separated/htdemucs/song/vocals.wav",
                    "drums": "/w/separated/htdemucs/song/drums.wav",
                }
            }),
        );

        assert!(result.is_success());
        assert!(result.error().is_none());

        let payload = result.payload();
        assert_eq!(payload["status"], "success");
        assert!(payload["tracks"]["vocals"].as_str().unwrap().ends_with("vocals.wav"));
        assert!(payload.get("error").is_none());
    }

    #[test]
    fn test_failure_payload_shape() {
        let result = ToolResult::failure(
            "audio_to_midi",
            ToolError::output_missing("/w/midi/song_basic_pitch.mid"),
        );

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "OUTPUT_MISSING");

        let payload = result.payload();
        assert!(payload.get("status").is_none());
        assert!(
            payload["error"]
                .as_str()
                .unwrap()
                .contains("Expected output file not found")
        );
    }

    #[test]
    fn test_success_with_non_object_fields_is_empty() {
        let result = ToolResult::success("generate_music", serde_json::json!("oops"));
        assert!(result.fields.is_empty());
        assert_eq!(result.payload(), serde_json::json!({"status": "success"}));
    }

    #[test]
    fn test_error_constructors_codes() {
        assert_eq!(ToolError::not_found("x").code, "NOT_FOUND");
        assert_eq!(ToolError::invalid_argument("x").code, "INVALID_ARGUMENT");
        assert_eq!(ToolError::execution_failed("x").code, "EXECUTION_FAILED");
        assert_eq!(ToolError::output_missing("x").code, "OUTPUT_MISSING");
        assert_eq!(ToolError::timeout("x").code, "TIMEOUT");
    }
}
