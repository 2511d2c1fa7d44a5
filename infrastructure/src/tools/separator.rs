//! Stem separation capability: separate_audio_stems (demucs)

use super::subprocess::{self, SubprocessError};
use maestro_domain::{
    Capability, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, WorkspaceLayout,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Get the capability descriptor for separate_audio_stems
pub fn separate_definition() -> ToolDefinition {
    ToolDefinition::new(
        Capability::SeparateStems.as_str(),
        "Extract and separate an audio file into distinct stems: vocals, drums, bass, and \
         other instruments. Use this when the user wants to isolate human voice, extract \
         background music, or get specific instrumental tracks from a song.",
    )
    .with_parameter(
        ToolParameter::new(
            "input_file_path",
            "The relative or absolute file path to the target audio file (e.g., 'test.mp3').",
            true,
        )
        .with_type("path"),
    )
}

/// Adapter running the demucs separation model as a subprocess.
///
/// Demucs writes its stems under `<separated>/htdemucs/<input_stem>/`; the
/// adapter verifies all four expected files on disk before reporting
/// success. A zero exit alone is never success.
pub struct StemSeparator {
    layout: WorkspaceLayout,
    program: String,
    timeout: Duration,
}

impl StemSeparator {
    pub fn new(layout: WorkspaceLayout, program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            layout,
            program: program.into(),
            timeout,
        }
    }

    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let name = Capability::SeparateStems.as_str();

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

        let out_dir = self.layout.separated_dir();
        if let Err(e) = std::fs::create_dir_all(&out_dir) {
            return ToolResult::failure(
                name,
                ToolError::execution_failed(format!(
                    "Could not create output directory {}: {e}",
                    out_dir.display()
                )),
            );
        }

        info!(input = %input.display(), "Running stem separation");
        let args: Vec<std::ffi::OsString> = vec![
            "-n".into(),
            "htdemucs".into(),
            "-o".into(),
            out_dir.clone().into(),
            input.clone().into(),
        ];
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
                    "Demucs execution failed. Subprocess error: {}",
                    output.failure_detail()
                )),
            );
        }

        // Trust-but-verify: every expected stem must exist on disk.
        let mut tracks = serde_json::Map::new();
        for (stem, path) in self.layout.stem_paths(&input) {
            if !path.exists() {
                return ToolResult::failure(name, ToolError::output_missing(path.display().to_string()));
            }
            tracks.insert(stem.to_string(), json!(absolute_display(&path)));
        }

        info!(stems = tracks.len(), "Separation completed successfully");
        ToolResult::success(name, json!({ "tracks": tracks }))
    }
}

/// Best-effort absolute path for the model-facing payload.
pub(crate) fn absolute_display(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable shell stub standing in for the external command.
    fn write_stub(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    fn make_input(dir: &Path) -> PathBuf {
        let input = dir.join("song.mp3");
        std::fs::write(&input, b"fake audio").unwrap();
        input
    }

    #[tokio::test]
    async fn test_all_stems_produced_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let input = make_input(dir.path());
        // Mimics demucs: writes <out>/htdemucs/<stem>/{vocals,drums,bass,other}.wav
        let stub = write_stub(
            dir.path(),
            "demucs-ok",
            r#"out="$4"; input="$5"
base=$(basename "$input"); base="${base%.*}"
mkdir -p "$out/htdemucs/$base"
for t in vocals drums bass other; do touch "$out/htdemucs/$base/$t.wav"; done"#,
        );

        let separator = StemSeparator::new(
            WorkspaceLayout::new(dir.path()),
            stub,
            Duration::from_secs(10),
        );
        let call = ToolCall::new("separate_audio_stems")
            .with_arg("input_file_path", input.display().to_string());

        let result = separator.execute(&call).await;
        assert!(result.is_success(), "expected success, got {:?}", result.error());

        let payload = result.payload();
        assert_eq!(payload["status"], "success");
        for stem in ["vocals", "drums", "bass", "other"] {
            assert!(
                payload["tracks"][stem].as_str().unwrap().ends_with(&format!("{stem}.wav"))
            );
        }
    }

    #[tokio::test]
    async fn test_zero_exit_without_artifacts_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = make_input(dir.path());
        // Exits 0 but produces nothing.
        let stub = write_stub(dir.path(), "demucs-liar", "exit 0");

        let separator = StemSeparator::new(
            WorkspaceLayout::new(dir.path()),
            stub,
            Duration::from_secs(10),
        );
        let call = ToolCall::new("separate_audio_stems")
            .with_arg("input_file_path", input.display().to_string());

        let result = separator.execute(&call).await;
        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "OUTPUT_MISSING");
        assert!(result.payload()["error"]
            .as_str()
            .unwrap()
            .contains("Expected output file not found"));
    }

    #[tokio::test]
    async fn test_partial_stems_fail_the_whole_call() {
        let dir = tempfile::tempdir().unwrap();
        let input = make_input(dir.path());
        // Produces only vocals.
        let stub = write_stub(
            dir.path(),
            "demucs-partial",
            r#"out="$4"; input="$5"
base=$(basename "$input"); base="${base%.*}"
mkdir -p "$out/htdemucs/$base"
touch "$out/htdemucs/$base/vocals.wav""#,
        );

        let separator = StemSeparator::new(
            WorkspaceLayout::new(dir.path()),
            stub,
            Duration::from_secs(10),
        );
        let call = ToolCall::new("separate_audio_stems")
            .with_arg("input_file_path", input.display().to_string());

        let result = separator.execute(&call).await;
        assert_eq!(result.error().unwrap().code, "OUTPUT_MISSING");
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr_detail() {
        let dir = tempfile::tempdir().unwrap();
        let input = make_input(dir.path());
        let stub = write_stub(dir.path(), "demucs-broken", "echo 'CUDA out of memory' >&2; exit 1");

        let separator = StemSeparator::new(
            WorkspaceLayout::new(dir.path()),
            stub,
            Duration::from_secs(10),
        );
        let call = ToolCall::new("separate_audio_stems")
            .with_arg("input_file_path", input.display().to_string());

        let result = separator.execute(&call).await;
        assert_eq!(result.error().unwrap().code, "EXECUTION_FAILED");
        assert!(result.error().unwrap().message.contains("CUDA out of memory"));
    }

    #[tokio::test]
    async fn test_missing_input_file_fails_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let separator = StemSeparator::new(
            WorkspaceLayout::new(dir.path()),
            "demucs-should-never-run",
            Duration::from_secs(10),
        );
        let call = ToolCall::new("separate_audio_stems")
            .with_arg("input_file_path", "/nonexistent/song.mp3");

        let result = separator.execute(&call).await;
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
        assert!(result.error().unwrap().message.contains("Input file not found"));
    }

    #[tokio::test]
    async fn test_hung_command_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let input = make_input(dir.path());
        let stub = write_stub(dir.path(), "demucs-hang", "sleep 30");

        let separator = StemSeparator::new(
            WorkspaceLayout::new(dir.path()),
            stub,
            Duration::from_millis(200),
        );
        let call = ToolCall::new("separate_audio_stems")
            .with_arg("input_file_path", input.display().to_string());

        let result = separator.execute(&call).await;
        assert_eq!(result.error().unwrap().code, "TIMEOUT");
    }
}
