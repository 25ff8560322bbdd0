//! Command execution utilities for directory and scheduler queries.

use thiserror::Error;
use tokio::process::Command;

/// Error type for command execution.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to execute {command}: {error}")]
    Execution { command: String, error: String },
    #[error("Command {command} failed (exit code {code:?}): {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl CommandError {
    /// Exit code of a command that ran but did not succeed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Failed { code, .. } => *code,
            Self::Execution { .. } => None,
        }
    }
}

/// Execute a command and return stdout as a string.
///
/// A non-zero exit status is reported as [`CommandError::Failed`] carrying
/// the exit code and stderr, so callers can tell "not found" answers
/// (e.g. `getent` exiting with 2) apart from real failures.
pub async fn run_command(cmd: &mut Command, name: &str) -> Result<String, CommandError> {
    tracing::trace!(command = name, "running external command");

    let output = cmd.output().await.map_err(|e| CommandError::Execution {
        command: name.to_string(),
        error: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CommandError::Failed {
            command: name.to_string(),
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_command_success() {
        let mut cmd = Command::new("echo");
        cmd.arg("hello");
        let result = run_command(&mut cmd, "echo").await.unwrap();
        assert_eq!(result.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_command_not_found() {
        let mut cmd = Command::new("nonexistent_command_12345");
        let result = run_command(&mut cmd, "nonexistent").await;
        assert!(matches!(result, Err(CommandError::Execution { .. })));
        assert_eq!(result.unwrap_err().exit_code(), None);
    }

    #[tokio::test]
    async fn test_run_command_reports_exit_code() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo oops >&2; exit 2"]);
        let err = run_command(&mut cmd, "sh").await.unwrap_err();
        assert_eq!(err.exit_code(), Some(2));
        match err {
            CommandError::Failed { stderr, .. } => assert_eq!(stderr, "oops"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
