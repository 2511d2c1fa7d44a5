//! Prompt templates for the workflow agent

use crate::tool::entities::ToolSpec;

/// Templates for the turns the orchestrator seeds a run with.
///
/// The system prompt is the operator's lever for constraining *when* the
/// model may chain multiple capabilities versus answering after one call.
/// Tightening that policy is a text change here, not a change to the loop.
pub struct WorkflowPromptTemplate;

impl WorkflowPromptTemplate {
    /// System prompt: fixed operating instructions plus the capability list.
    pub fn system(tool_spec: &ToolSpec) -> String {
        let tool_descriptions = tool_spec
            .all()
            .map(|t| {
                let params = t
                    .parameters
                    .iter()
                    .map(|p| {
                        let required = if p.required { " (required)" } else { "" };
                        format!("    - {}: {}{}", p.name, p.description, required)
                    })
                    .collect::<Vec<_>>()
                    .join("\n");

                format!("- **{}**: {}\n  Parameters:\n{}", t.name, t.description, params)
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"You are Music-Agent, a professional AI audio processing assistant.

## Available Tools

{tool_descriptions}

## Guidelines

1. You MUST use the tools when the user asks for audio separation, transcription, or generation. Do not apologize, just call the tool.
2. Only chain multiple tools when the request genuinely needs intermediate results (e.g. separate a stem, then transcribe it). A single-step request gets a single tool call.
3. After a tool returns a result, summarize the output file paths for the user clearly and concisely.
4. If a tool returns an error, explain what went wrong in plain language and, when sensible, retry with corrected arguments.
"#
        )
    }

    /// User turn text, with the uploaded file's path appended as a context
    /// annotation when the caller provides one.
    pub fn user(prompt: &str, uploaded_file: Option<&str>) -> String {
        match uploaded_file {
            Some(path) => format!(
                "{prompt}\n\n[System Context: The user has uploaded an audio file located at '{path}'. \
                 If the user asks to process the file, extract and use this exact path for the tool.]"
            ),
            None => prompt.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ToolDefinition, ToolParameter};

    #[test]
    fn test_system_prompt_lists_capabilities() {
        let spec = ToolSpec::new().register(
            ToolDefinition::new("separate_audio_stems", "Split audio into stems").with_parameter(
                ToolParameter::new("input_file_path", "Path to the audio file", true),
            ),
        );

        let prompt = WorkflowPromptTemplate::system(&spec);
        assert!(prompt.contains("Music-Agent"));
        assert!(prompt.contains("**separate_audio_stems**"));
        assert!(prompt.contains("input_file_path"));
        assert!(prompt.contains("(required)"));
    }

    #[test]
    fn test_user_prompt_with_context_injection() {
        let text = WorkflowPromptTemplate::user("isolate the vocals", Some("/w/inputs/song.mp3"));
        assert!(text.starts_with("isolate the vocals"));
        assert!(text.contains("/w/inputs/song.mp3"));
    }

    #[test]
    fn test_user_prompt_without_file() {
        let text = WorkflowPromptTemplate::user("what can you do?", None);
        assert_eq!(text, "what can you do?");
    }
}
