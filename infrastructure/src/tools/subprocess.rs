//! External process invocation with a per-call deadline.
//!
//! Every capability adapter funnels its external command through
//! [`run_with_deadline`]. On expiry the child is killed (`kill_on_drop`) and
//! the caller gets a [`SubprocessError::Timeout`] to turn into a well-formed
//! tool error, so a hung external model can never wedge a run.

use maestro_domain::util::truncate_str;
use std::ffi::OsStr;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Cap on captured stdout/stderr carried into error messages.
const MAX_CAPTURED_OUTPUT: usize = 8 * 1024;

/// Errors from running an external command.
#[derive(Error, Debug)]
pub enum SubprocessError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' timed out after {secs} seconds")]
    Timeout { program: String, secs: u64 },

    #[error("failed waiting for '{program}': {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
}

/// Captured outcome of a finished external command.
#[derive(Debug)]
pub struct CapturedOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stderr if present, otherwise stdout. External tools are inconsistent
    /// about which stream carries the failure reason.
    pub fn failure_detail(&self) -> &str {
        if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Run `program` with `args`, killing it if it outlives `timeout`.
pub async fn run_with_deadline<I, S>(
    program: &str,
    args: I,
    timeout: Duration,
) -> Result<CapturedOutput, SubprocessError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(program, timeout_secs = timeout.as_secs(), "Spawning external command");

    let child = cmd.spawn().map_err(|source| SubprocessError::Spawn {
        program: program.to_string(),
        source,
    })?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            Ok(CapturedOutput {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: truncate_str(&stdout, MAX_CAPTURED_OUTPUT).to_string(),
                stderr: truncate_str(&stderr, MAX_CAPTURED_OUTPUT).to_string(),
            })
        }
        Ok(Err(source)) => Err(SubprocessError::Wait {
            program: program.to_string(),
            source,
        }),
        // Dropping the wait future kills the child via kill_on_drop.
        Err(_) => Err(SubprocessError::Timeout {
            program: program.to_string(),
            secs: timeout.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let output = run_with_deadline("echo", ["hello"], Duration::from_secs(5))
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_success() {
        let output = run_with_deadline("sh", ["-c", "echo broken >&2; exit 3"], Duration::from_secs(5))
            .await
            .unwrap();
        assert!(!output.success());
        assert_eq!(output.exit_code, 3);
        assert!(output.failure_detail().contains("broken"));
    }

    #[tokio::test]
    async fn test_failure_detail_falls_back_to_stdout() {
        let output = run_with_deadline("sh", ["-c", "echo oops; exit 1"], Duration::from_secs(5))
            .await
            .unwrap();
        assert!(output.failure_detail().contains("oops"));
    }

    #[tokio::test]
    async fn test_deadline_kills_hung_command() {
        let err = run_with_deadline("sleep", ["30"], Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, SubprocessError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = run_with_deadline(
            "definitely-not-a-real-program-xyz",
            Vec::<String>::new(),
            Duration::from_secs(1),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SubprocessError::Spawn { .. }));
    }
}
