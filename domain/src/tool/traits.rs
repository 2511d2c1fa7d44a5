//! Capability call validation
//!
//! Pure domain logic that checks a model-supplied call against the advertised
//! descriptor before anything touches the filesystem. The descriptor schema
//! is advisory to the model; this is where it becomes binding.

use super::entities::{ToolCall, ToolDefinition};

/// Validator for capability calls
pub trait ToolValidator {
    /// Validate a call against its descriptor, returning a message suitable
    /// for feeding back to the model on failure.
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of [`ToolValidator`]
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        let valid_params: std::collections::HashSet<&str> =
            definition.parameters.iter().map(|p| p.name.as_str()).collect();

        for arg_name in call.arguments.keys() {
            if !valid_params.contains(arg_name.as_str()) {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
        }

        Ok(())
    }
}
