// Command execution seam for the daemon CLI
//
// Every daemon operation is a single CLI invocation. `CommandRunner` is the
// handle the device client talks to; `ProcessRunner` is the real thing, tests
// substitute scripted runners.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use crate::errors::{Result, ZeroTierError};

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and return its stdout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// Runs commands as child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ZeroTierError::CommandUnavailable {
                program: program.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(ZeroTierError::remote(
                None,
                format!("{} exited with code {}: {}", program, exit_code, detail),
            ));
        }

        Ok(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_process_runner_returns_stdout() {
        let out = ProcessRunner.run("sh", &["-c", "echo hello"]).await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn test_process_runner_nonzero_exit_is_remote_error() {
        let err = ProcessRunner
            .run("sh", &["-c", "echo 'port busy' >&2; exit 3"])
            .await
            .unwrap_err();
        match err {
            ZeroTierError::Remote { status, message } => {
                assert!(status.is_none());
                assert!(message.contains("port busy"), "got: {}", message);
                assert!(message.contains("code 3"), "got: {}", message);
            }
            other => panic!("expected Remote, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_process_runner_falls_back_to_stdout_detail() {
        let err = ProcessRunner
            .run("sh", &["-c", "echo '400 join failed'; exit 1"])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("400 join failed"));
    }

    #[tokio::test]
    async fn test_process_runner_missing_program() {
        let err = ProcessRunner
            .run("definitely-not-a-real-zerotier-cli", &["-v"])
            .await
            .unwrap_err();
        assert!(matches!(err, ZeroTierError::CommandUnavailable { .. }));
    }
}
