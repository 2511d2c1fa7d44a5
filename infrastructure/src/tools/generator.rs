//! Text-to-audio generation capability: generate_music (musicgen)

use super::subprocess::{self, SubprocessError};
use maestro_domain::{
    Capability, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, WorkspaceLayout,
};
use serde_json::json;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Fixed output duration in seconds. Bounded so a single call cannot tie up
/// the machine for arbitrary lengths; deliberately not model-configurable.
const GENERATION_DURATION_SECS: u32 = 10;

/// Get the capability descriptor for generate_music
pub fn generate_definition() -> ToolDefinition {
    ToolDefinition::new(
        Capability::GenerateMusic.as_str(),
        "Generate a short piece of original music from a natural-language text description. \
         Use this when the user asks to create, compose, or synthesize new audio (e.g. 'a \
         lofi hip hop beat' or 'cyberpunk synth at 120bpm'). Output is a fixed-length WAV \
         clip of about ten seconds.",
    )
    .with_parameter(ToolParameter::new(
        "prompt",
        "A text description of the music to generate, including style, mood, instruments \
         or tempo.",
        true,
    ))
}

/// Handle to the loaded generation backend.
///
/// Construction is guarded by a `OnceCell` in [`MusicGenerator`]: the
/// backing model is loaded exactly once per process and the handle is reused
/// by every subsequent call, which is what makes repeat generations fast.
struct GeneratorEngine {
    program: String,
    duration_secs: u32,
}

/// Adapter running the musicgen text-to-audio model.
///
/// Output always lands at the fixed workspace path
/// `outputs/generated_music.wav`; a repeat call overwrites the previous clip.
pub struct MusicGenerator {
    layout: WorkspaceLayout,
    program: String,
    timeout: Duration,
    engine: OnceCell<GeneratorEngine>,
}

impl MusicGenerator {
    pub fn new(layout: WorkspaceLayout, program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            layout,
            program: program.into(),
            timeout,
            engine: OnceCell::new(),
        }
    }

    async fn engine(&self) -> &GeneratorEngine {
        self.engine
            .get_or_init(|| async {
                info!("Initializing music generation engine (first call loads the model)");
                GeneratorEngine {
                    program: self.program.clone(),
                    duration_secs: GENERATION_DURATION_SECS,
                }
            })
            .await
    }

    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let name = Capability::GenerateMusic.as_str();

        let prompt = match call.require_string("prompt") {
            Ok(p) => p.to_string(),
            Err(e) => return ToolResult::failure(name, ToolError::invalid_argument(e)),
        };
        if prompt.trim().is_empty() {
            return ToolResult::failure(
                name,
                ToolError::invalid_argument("Generation prompt must not be empty"),
            );
        }

        let out_dir = self.layout.outputs_dir();
        if let Err(e) = std::fs::create_dir_all(&out_dir) {
            return ToolResult::failure(
                name,
                ToolError::execution_failed(format!(
                    "Could not create output directory {}: {e}",
                    out_dir.display()
                )),
            );
        }

        let engine = self.engine().await;
        let out_path = self.layout.generated_audio_path();

        // The output path is fixed, so a clip from an earlier run would
        // satisfy the artifact check even if this invocation produced nothing.
        if out_path.exists() {
            info!(path = %out_path.display(), "Deleting stale generated clip before generating");
            if let Err(e) = std::fs::remove_file(&out_path) {
                warn!("Could not delete existing clip {}: {e}", out_path.display());
            }
        }

        info!(prompt = %prompt, "Running music generation");
        let args: Vec<std::ffi::OsString> = vec![
            "--output".into(),
            out_path.clone().into(),
            "--duration".into(),
            engine.duration_secs.to_string().into(),
            prompt.clone().into(),
        ];
        let output = match subprocess::run_with_deadline(&engine.program, args, self.timeout).await
        {
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
                    "Music generation failed. Subprocess error: {}",
                    output.failure_detail()
                )),
            );
        }

        if !out_path.exists() {
            return ToolResult::failure(
                name,
                ToolError::output_missing(out_path.display().to_string()),
            );
        }

        info!(path = %out_path.display(), "Music generated successfully");
        ToolResult::success(
            name,
            json!({
                "audio_path": super::separator::absolute_display(&out_path),
                "description": format!("New music generated based on: {prompt}"),
            }),
        )
    }
}
