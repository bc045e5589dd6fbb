//! Task records collected for the run summary, and the [`Log`] seam.

/// One line of the run summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Step name as returned by `Task::name`.
    pub name: String,
    /// How the step ended.
    pub status: TaskStatus,
    /// Skip reason or invocation counts.
    pub message: Option<String>,
}

/// How a provisioning step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Every command the step ran exited zero.
    Ok,
    /// Filtered out by `--skip` / `--only`.
    NotApplicable,
    /// Nothing to do, e.g. no `config.json`.
    Skipped,
    /// Commands were printed, not run.
    DryRun,
    /// The step finished but some commands exited non-zero.
    Partial,
    /// The step could not run at all.
    Failed,
}

impl TaskStatus {
    /// Summary icon and its SGR colour code.
    #[must_use]
    pub const fn marker(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::NotApplicable => ("·", "\x1b[2m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::Partial => ("!", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// Output sink handed to tasks.
///
/// Implemented by [`Logger`](super::Logger); tasks only see `&dyn Log`.
pub trait Log: Send + Sync {
    /// Section header, one per step.
    fn stage(&self, msg: &str);
    /// Progress line.
    fn info(&self, msg: &str);
    /// Detail shown with `--verbose` and always written to the log file.
    fn debug(&self, msg: &str);
    /// A command failed or the config looks wrong.
    fn warn(&self, msg: &str);
    /// A step could not run.
    fn error(&self, msg: &str);
    /// A command that would run without `--dry-run`.
    fn dry_run(&self, msg: &str);
    /// Add a line to the run summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_and_skipped_share_colour_not_icon() {
        let (partial_icon, partial_colour) = TaskStatus::Partial.marker();
        let (skipped_icon, skipped_colour) = TaskStatus::Skipped.marker();
        assert_eq!(partial_colour, skipped_colour);
        assert_ne!(partial_icon, skipped_icon);
    }

    #[test]
    fn failed_is_red() {
        assert_eq!(TaskStatus::Failed.marker(), ("✗", "\x1b[31m"));
    }
}
