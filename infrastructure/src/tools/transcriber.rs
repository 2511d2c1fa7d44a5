//! Audio-to-MIDI transcription capability: audio_to_midi (basic-pitch)

use super::subprocess::{self, SubprocessError};
use maestro_domain::{
    Capability, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, WorkspaceLayout,
};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Get the capability descriptor for audio_to_midi
pub fn transcribe_definition() -> ToolDefinition {
    ToolDefinition::new(
        Capability::AudioToMidi.as_str(),
        "Transcribe an audio file into a MIDI file using pitch detection. Use this when the \
         user wants sheet-music-like note data, wants to hear the melody on another \
         instrument, or asks to convert audio to MIDI. Works best on a single separated \
         stem (e.g. vocals or bass) rather than a full mix.",
    )
    .with_parameter(
        ToolParameter::new(
            "input_file_path",
            "The relative or absolute file path to the audio file to transcribe.",
            true,
        )
        .with_type("path"),
    )
}

/// Adapter running the basic-pitch transcription model as a subprocess.
///
/// The external tool refuses to overwrite an existing MIDI file, so a stale
/// same-named artifact from an earlier run is deleted up front. Verification
/// afterwards therefore always checks a freshly produced file.
pub struct Transcriber {
    layout: WorkspaceLayout,
    program: String,
    timeout: Duration,
}

impl Transcriber {
    pub fn new(layout: WorkspaceLayout, program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            layout,
            program: program.into(),
            timeout,
        }
    }

    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let name = Capability::AudioToMidi.as_str();

        let input = match call.require_string("input_file_path") {
            Ok(p) => PathBuf::from(p),
            Err(e) => return ToolResult::failure(name, ToolError::invalid_argument(e)),
        };
        if !input.exists() {
            return ToolResult::failure(
                name,
                ToolError::invalid_argument(format!("Input file not found: {}", input.display())),
            );
        }

        let midi_dir = self.layout.midi_dir();
        if let Err(e) = std::fs::create_dir_all(&midi_dir) {
            return ToolResult::failure(
                name,
                ToolError::execution_failed(format!(
                    "Could not create output directory {}: {e}",
                    midi_dir.display()
                )),
            );
        }

        let midi_path = self.layout.midi_path(&input);
        if midi_path.exists() {
            info!(path = %midi_path.display(), "Deleting stale MIDI artifact before transcribing");
            if let Err(e) = std::fs::remove_file(&midi_path) {
                warn!("Could not delete existing MIDI {}: {e}", midi_path.display());
            }
        }

        info!(input = %input.display(), "Running audio-to-MIDI transcription");
        let args: Vec<std::ffi::OsString> = vec![midi_dir.into(), input.clone().into()];
        let output = match subprocess::run_with_deadline(&self.program, args, self.timeout).await {
            Ok(o) => o,
            Err(e @ SubprocessError::Timeout { .. }) => {
                return ToolResult::failure(name, ToolError::timeout(e.to_string()));
            }
            Err(e) => {
                return ToolResult::failure(name, ToolError::execution_failed(e.to_string()));
            }
        };

        if !output.success() {
            return ToolResult::failure(
                name,
                ToolError::execution_failed(format!(
                    "Basic-pitch execution failed. Subprocess error: {}",
                    output.failure_detail()
                )),
            );
        }

        if !midi_path.exists() {
            return ToolResult::failure(
                name,
                ToolError::output_missing(midi_path.display().to_string()),
            );
        }

        info!(path = %midi_path.display(), "Transcription successful");
        ToolResult::success(
            name,
            json!({ "midi_path": super::separator::absolute_display(&midi_path) }),
        )
    }
}
