//! External command execution.
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::process::{Command, ExitStatus, Output};

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output (empty for inherited stdio).
    pub stdout: String,
    /// Captured standard error (empty for inherited stdio).
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// One-line description of a failed result for log output.
    #[must_use]
    pub fn failure_reason(&self) -> String {
        let code = self
            .code
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exit {code}")
        } else {
            format!("exit {code}: {stderr}")
        }
    }
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

impl From<ExitStatus> for ExecResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Abstraction over process spawning so tasks can be tested without
/// touching the host system.
///
/// None of the methods fail on a non-zero exit status; they only fail when
/// the program cannot be spawned at all.
pub trait Executor: Send + Sync {
    /// Run a command with captured output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command attached to the parent's terminal (used for `sudo`,
    /// which may prompt for a password).
    ///
    /// Arguments are passed through as raw OS strings so non-UTF-8 paths
    /// survive unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run_inherited(&self, program: &str, args: &[&OsStr]) -> Result<ExecResult>;

    /// Check if a program is resolvable on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(output))
    }

    fn run_inherited(&self, program: &str, args: &[&OsStr]) -> Result<ExecResult> {
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(status))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Render a command line for log output.
#[must_use]
pub fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn run_unchecked_echo() {
        let result = SystemExecutor.run_unchecked("echo", &["hello"]).unwrap();
        assert!(result.success, "echo command should succeed");
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn run_unchecked_failure_is_not_an_error() {
        let result = SystemExecutor.run_unchecked("false", &[]).unwrap();
        assert!(!result.success, "non-zero exit should set success=false");
        assert_eq!(result.code, Some(1));
    }

    #[test]
    fn run_unchecked_missing_program_is_an_error() {
        let result = SystemExecutor.run_unchecked("this-program-does-not-exist-12345", &[]);
        assert!(result.is_err(), "spawn failure should produce an error");
    }

    #[test]
    fn run_inherited_reports_status() {
        let result = SystemExecutor.run_inherited("true", &[]).unwrap();
        assert!(result.success);
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn which_finds_known_program() {
        assert!(SystemExecutor.which("sh"), "sh should be found on Unix");
    }

    #[test]
    fn which_missing_program() {
        assert!(
            !SystemExecutor.which("this-program-does-not-exist-12345"),
            "non-existent program should not be found"
        );
    }

    #[test]
    fn failure_reason_includes_stderr() {
        let result = ExecResult {
            stdout: String::new(),
            stderr: "Error: Unable to find a match: nope\n".to_string(),
            success: false,
            code: Some(1),
        };
        assert_eq!(
            result.failure_reason(),
            "exit 1: Error: Unable to find a match: nope"
        );
    }

    #[test]
    fn failure_reason_for_signal() {
        let result = ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: false,
            code: None,
        };
        assert_eq!(result.failure_reason(), "exit signal");
    }

    #[test]
    fn display_command_joins_args() {
        assert_eq!(
            display_command("dnf", &["install", "-y", "-q", "jq"]),
            "dnf install -y -q jq"
        );
        assert_eq!(display_command("true", &[]), "true");
    }

    #[test]
    fn recording_executor_replays_script() {
        let executor = test_helpers::RecordingExecutor::new().with_responses(&[false]);
        assert!(!executor.run_unchecked("dnf", &["a"]).unwrap().success);
        assert!(executor.run_unchecked("dnf", &["b"]).unwrap().success);
        let calls = executor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].1, vec!["b".to_string()]);
    }
}
