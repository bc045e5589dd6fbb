//! Named provisioning steps, executed in a fixed order.
pub mod downloads;
pub mod flatpaks;
pub mod local_packages;
pub mod packages;
pub mod prerequisites;

use std::fmt;

use anyhow::Result;

use crate::config::{Config, ConfigSource, Paths};
use crate::exec::Executor;
use crate::logging::{Log, TaskStatus};
use crate::platform::Platform;
use crate::resources::{Applicable, ResourceChange};

/// Skip reason reported by every step that needs `config.json`.
pub const CONFIG_NOT_FOUND: &str = "config file not found";

/// Shared, read-only state for task execution.
///
/// Everything is resolved once at startup and borrowed by every task.
pub struct Context<'a> {
    /// Detected host identity.
    pub platform: &'a Platform,
    /// The config file, parsed once.
    pub config: &'a ConfigSource,
    /// Working-directory layout.
    pub paths: &'a Paths,
    /// Logger for output and task recording.
    pub log: &'a dyn Log,
    /// Command executor (real or recording).
    pub executor: &'a dyn Executor,
    /// Print commands instead of running them.
    pub dry_run: bool,
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("platform", &self.platform)
            .field("config", &self.config)
            .field("paths", &self.paths)
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl<'a> Context<'a> {
    /// The parsed config, or `None` after logging that the file is missing.
    #[must_use]
    pub fn config_or_report(&self) -> Option<&'a Config> {
        match self.config {
            ConfigSource::Loaded(config) => Some(config),
            ConfigSource::NotFound(path) => {
                self.log
                    .info(&format!("{CONFIG_NOT_FOUND}: {}", path.display()));
                None
            }
        }
    }
}

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use fedora_provision::tasks::TaskResult;
///
/// let skipped = TaskResult::Skipped("config file not found".into());
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Every command the task ran succeeded.
    Ok,
    /// Task had nothing to do.
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
    /// Task ran to the end but some commands exited non-zero.
    Partial(String),
}

/// Per-task invocation counters.
///
/// # Examples
///
/// ```
/// use fedora_provision::tasks::TaskStats;
///
/// let stats = TaskStats { applied: 3, already_ok: 1, failed: 0 };
/// assert_eq!(stats.summary(false), "3 applied, 1 already ok");
/// assert_eq!(stats.summary(true), "3 would apply, 1 already ok");
///
/// let stats = TaskStats { applied: 2, already_ok: 0, failed: 1 };
/// assert_eq!(stats.summary(false), "2 applied, 0 already ok, 1 failed");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Commands that ran successfully (or would run, in dry-run mode).
    pub applied: u32,
    /// Items that needed no command.
    pub already_ok: u32,
    /// Commands that failed to spawn or exited non-zero.
    pub failed: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would apply" } else { "applied" };
        if self.failed > 0 {
            format!(
                "{} {verb}, {} already ok, {} failed",
                self.applied, self.already_ok, self.failed
            )
        } else {
            format!("{} {verb}, {} already ok", self.applied, self.already_ok)
        }
    }

    /// Log the summary and return the matching [`TaskResult`].
    #[must_use]
    pub fn finish(self, ctx: &Context<'_>) -> TaskResult {
        let summary = self.summary(ctx.dry_run);
        ctx.log.info(&summary);
        if ctx.dry_run {
            TaskResult::DryRun
        } else if self.failed > 0 {
            TaskResult::Partial(summary)
        } else {
            TaskResult::Ok
        }
    }
}

/// Apply one resource, logging and counting the outcome.
///
/// Never aborts the caller: spawn errors and non-zero exits are logged as
/// warnings and counted in `stats.failed`.
pub fn apply_resource(
    ctx: &Context<'_>,
    resource: &dyn Applicable,
    verb: &str,
    stats: &mut TaskStats,
) {
    if ctx.dry_run {
        ctx.log.dry_run(&resource.command_line());
        stats.applied += 1;
        return;
    }

    let description = resource.description();
    ctx.log.info(&format!("{verb} {description}"));
    match resource.apply() {
        Ok(ResourceChange::Applied) => {
            ctx.log.debug(&format!("ok: {description}"));
            stats.applied += 1;
        }
        Ok(ResourceChange::AlreadyCorrect) => {
            ctx.log.debug(&format!("ok: {description} (already ok)"));
            stats.already_ok += 1;
        }
        Ok(ResourceChange::Failed { reason }) => {
            ctx.log.warn(&format!("{description}: {reason}"));
            stats.failed += 1;
        }
        Err(e) => {
            ctx.log.warn(&format!("{description}: {e:#}"));
            stats.failed += 1;
        }
    }
}

/// A named, executable provisioning step.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &'static str;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error only if the task cannot start. Failed commands are
    /// counted and unreadable folder entries are logged instead.
    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult>;
}

/// Every provisioning step, in execution order.
#[must_use]
pub fn all_provision_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(prerequisites::InstallJq),
        Box::new(prerequisites::InstallRpmFusion),
        Box::new(prerequisites::AddFlathubRemote),
        Box::new(downloads::DownloadUrlPackages),
        Box::new(local_packages::InstallLocalPackages),
        Box::new(flatpaks::InstallFlatpaks),
        Box::new(packages::InstallPackages),
    ]
}

/// Whether a task survives `--skip` / `--only` filtering.
///
/// Keywords match case-insensitively anywhere in the task name; `only`
/// takes precedence over `skip`.
#[must_use]
pub fn is_selected(task: &dyn Task, skip: &[String], only: &[String]) -> bool {
    let name = task.name().to_lowercase();
    if !only.is_empty() {
        return only.iter().any(|o| name.contains(&o.to_lowercase()));
    }
    !skip.iter().any(|s| name.contains(&s.to_lowercase()))
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context<'_>) {
    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Ok(TaskResult::Partial(summary)) => {
            ctx.log
                .record_task(task.name(), TaskStatus::Partial, Some(&summary));
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}

/// Record a task filtered out by `--skip` / `--only`.
pub fn record_filtered(task: &dyn Task, ctx: &Context<'_>) {
    ctx.log.debug(&format!("skipping task: {} (filtered)", task.name()));
    ctx.log
        .record_task(task.name(), TaskStatus::NotApplicable, Some("filtered"));
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::TaskStatus;
    use test_helpers::{Fixture, nowhere};

    /// A mock task for testing `execute()`.
    struct MockTask {
        name: &'static str,
        result: Result<TaskResult, String>,
    }

    impl Task for MockTask {
        fn name(&self) -> &'static str {
            self.name
        }
        fn run(&self, _ctx: &Context<'_>) -> Result<TaskResult> {
            self.result.clone().map_err(|s| anyhow::anyhow!("{s}"))
        }
    }

    fn run_mock(result: Result<TaskResult, String>) -> Vec<crate::logging::TaskEntry> {
        let fixture = Fixture::without_config(&nowhere());
        let task = MockTask {
            name: "mock-task",
            result,
        };
        execute(&task, &fixture.ctx());
        fixture.log.task_entries()
    }

    #[test]
    fn execute_records_ok_task() {
        let entries = run_mock(Ok(TaskResult::Ok));
        assert_eq!(entries[0].status, TaskStatus::Ok);
    }

    #[test]
    fn execute_records_failed_task() {
        let entries = run_mock(Err("kaboom".to_string()));
        assert_eq!(entries[0].status, TaskStatus::Failed);
        assert_eq!(entries[0].message.as_deref(), Some("kaboom"));
    }

    #[test]
    fn execute_records_skipped_task_with_reason() {
        let entries = run_mock(Ok(TaskResult::Skipped("nothing".to_string())));
        assert_eq!(entries[0].status, TaskStatus::Skipped);
        assert_eq!(entries[0].message.as_deref(), Some("nothing"));
    }

    #[test]
    fn execute_records_partial_task() {
        let entries = run_mock(Ok(TaskResult::Partial("1 failed".to_string())));
        assert_eq!(entries[0].status, TaskStatus::Partial);
    }

    #[test]
    fn stats_finish_partial_on_failure() {
        let fixture = Fixture::without_config(&nowhere());
        let stats = TaskStats {
            applied: 1,
            already_ok: 0,
            failed: 2,
        };
        assert_eq!(
            stats.finish(&fixture.ctx()),
            TaskResult::Partial("1 applied, 0 already ok, 2 failed".to_string())
        );
    }

    #[test]
    fn stats_finish_dry_run() {
        let fixture = Fixture::without_config(&nowhere()).dry_run();
        assert_eq!(TaskStats::new().finish(&fixture.ctx()), TaskResult::DryRun);
    }

    #[test]
    fn task_order_is_fixed() {
        let names: Vec<&str> = all_provision_tasks().iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "Install jq",
                "Install RPM Fusion repositories",
                "Add Flathub remote",
                "Download URL packages",
                "Install local packages",
                "Install flatpaks",
                "Install packages",
            ]
        );
    }

    #[test]
    fn only_filter_takes_precedence() {
        let task = packages::InstallPackages;
        let only = vec!["FLATPAK".to_string()];
        let skip = vec![];
        assert!(!is_selected(&task, &skip, &only));
        assert!(is_selected(&flatpaks::InstallFlatpaks, &skip, &only));
    }

    #[test]
    fn skip_filter_is_case_insensitive_substring() {
        let skip = vec!["rpm fusion".to_string()];
        assert!(!is_selected(&prerequisites::InstallRpmFusion, &skip, &[]));
        assert!(is_selected(&prerequisites::InstallJq, &skip, &[]));
    }

    #[test]
    fn record_filtered_marks_not_applicable() {
        let fixture = Fixture::without_config(&nowhere());
        record_filtered(&packages::InstallPackages, &fixture.ctx());
        assert_eq!(
            fixture.log.task_entries()[0].status,
            TaskStatus::NotApplicable
        );
    }

    #[test]
    fn config_or_report_none_when_missing() {
        let fixture = Fixture::without_config(&nowhere());
        assert!(fixture.ctx().config_or_report().is_none());
    }
}
