//! Provisioning primitives, each wrapping one external command.
pub mod download;
pub mod flatpak;
pub mod package;

use anyhow::Result;

use crate::exec::{ExecResult, Executor, display_command};

/// A resource that can be described and applied.
///
/// `apply` returns `Err` only when the command cannot be spawned at all.
/// A command that runs and exits non-zero yields [`ResourceChange::Failed`]
/// so the caller can count it and carry on.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// The command line `apply` would run, for dry-run output.
    fn command_line(&self) -> String;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying program cannot be executed.
    fn apply(&self) -> Result<ResourceChange>;
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use fedora_provision::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let failed = ResourceChange::Failed { reason: "exit 1".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, failed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// The command ran and exited successfully.
    Applied,
    /// Nothing needed doing.
    AlreadyCorrect,
    /// The command ran but exited non-zero.
    Failed {
        /// Exit code and stderr of the failed command.
        reason: String,
    },
}

impl From<ExecResult> for ResourceChange {
    fn from(result: ExecResult) -> Self {
        if result.success {
            Self::Applied
        } else {
            Self::Failed {
                reason: result.failure_reason(),
            }
        }
    }
}

/// Run `program args…` without checking its exit status and translate the
/// outcome into a [`ResourceChange`].
fn run_command(executor: &dyn Executor, program: &str, args: &[&str]) -> Result<ResourceChange> {
    tracing::debug!("running: {}", display_command(program, args));
    executor
        .run_unchecked(program, args)
        .map(ResourceChange::from)
}
