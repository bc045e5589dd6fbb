//! Host prerequisites: jq, the RPM Fusion repositories and the Flathub remote.
use anyhow::Result;

use super::{Context, Task, TaskResult, TaskStats, apply_resource};
use crate::resources::flatpak::FlatpakRemote;
use crate::resources::package::{DnfPackage, PackageSource};

/// Program checked on `PATH` before installing it.
const JQ: &str = "jq";

/// RPM Fusion repository flavours, installed in this order.
pub const RPMFUSION_KINDS: [&str; 2] = ["free", "nonfree"];

/// Release package URL of an RPM Fusion repository for a Fedora version.
///
/// # Examples
///
/// ```
/// use fedora_provision::tasks::prerequisites::rpmfusion_release_url;
///
/// assert_eq!(
///     rpmfusion_release_url("free", "40"),
///     "https://download1.rpmfusion.org/free/fedora/rpmfusion-free-release-40.noarch.rpm"
/// );
/// ```
#[must_use]
pub fn rpmfusion_release_url(kind: &str, version_id: &str) -> String {
    format!(
        "https://download1.rpmfusion.org/{kind}/fedora/rpmfusion-{kind}-release-{version_id}.noarch.rpm"
    )
}

/// Install jq if it is not already on `PATH`.
#[derive(Debug)]
pub struct InstallJq;

impl Task for InstallJq {
    fn name(&self) -> &'static str {
        "Install jq"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let mut stats = TaskStats::new();
        if ctx.executor.which(JQ) {
            ctx.log.info("jq is already installed");
            stats.already_ok += 1;
        } else {
            ctx.log.info("jq is not installed");
            let jq = DnfPackage::new(PackageSource::Name(JQ.to_string()), ctx.executor);
            apply_resource(ctx, &jq, "installing", &mut stats);
        }
        Ok(stats.finish(ctx))
    }
}

/// Install the free and nonfree RPM Fusion release packages for the
/// detected Fedora version.
#[derive(Debug)]
pub struct InstallRpmFusion;

impl Task for InstallRpmFusion {
    fn name(&self) -> &'static str {
        "Install RPM Fusion repositories"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let mut stats = TaskStats::new();
        for kind in RPMFUSION_KINDS {
            let url = rpmfusion_release_url(kind, &ctx.platform.version_id);
            let repo = DnfPackage::new(PackageSource::Url(url), ctx.executor);
            apply_resource(ctx, &repo, "installing", &mut stats);
        }
        Ok(stats.finish(ctx))
    }
}

/// Register the Flathub remote if missing.
#[derive(Debug)]
pub struct AddFlathubRemote;

impl Task for AddFlathubRemote {
    fn name(&self) -> &'static str {
        "Add Flathub remote"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let mut stats = TaskStats::new();
        let remote = FlatpakRemote::flathub(ctx.executor);
        apply_resource(ctx, &remote, "adding", &mut stats);
        Ok(stats.finish(ctx))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::RecordingExecutor;
    use crate::tasks::test_helpers::{Fixture, nowhere};

    #[test]
    fn jq_present_runs_nothing() {
        let fixture =
            Fixture::without_config(&nowhere()).executor(RecordingExecutor::new().with_program("jq"));
        assert_eq!(InstallJq.run(&fixture.ctx()).unwrap(), TaskResult::Ok);
        assert!(fixture.executor.calls().is_empty());
    }

    #[test]
    fn jq_missing_is_installed_with_dnf() {
        let fixture = Fixture::without_config(&nowhere());
        assert_eq!(InstallJq.run(&fixture.ctx()).unwrap(), TaskResult::Ok);
        let calls = fixture.executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "dnf");
        assert_eq!(calls[0].1, vec!["install", "-y", "-q", "jq"]);
    }

    #[test]
    fn rpmfusion_urls_embed_version_id() {
        let fixture = Fixture::without_config(&nowhere());
        InstallRpmFusion.run(&fixture.ctx()).unwrap();
        let calls = fixture.executor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].1[3],
            "https://download1.rpmfusion.org/free/fedora/rpmfusion-free-release-40.noarch.rpm"
        );
        assert_eq!(
            calls[1].1[3],
            "https://download1.rpmfusion.org/nonfree/fedora/rpmfusion-nonfree-release-40.noarch.rpm"
        );
    }

    #[test]
    fn rpmfusion_failure_does_not_stop_nonfree() {
        let fixture = Fixture::without_config(&nowhere())
            .executor(RecordingExecutor::new().with_responses(&[false, true]));
        let result = InstallRpmFusion.run(&fixture.ctx()).unwrap();
        assert!(matches!(result, TaskResult::Partial(_)));
        assert_eq!(fixture.executor.calls().len(), 2);
    }

    #[test]
    fn flathub_remote_added() {
        let fixture = Fixture::without_config(&nowhere());
        AddFlathubRemote.run(&fixture.ctx()).unwrap();
        let calls = fixture.executor.calls();
        assert_eq!(calls[0].0, "flatpak");
        assert_eq!(calls[0].1[0], "remote-add");
    }

    #[test]
    fn dry_run_spawns_nothing() {
        let fixture = Fixture::without_config(&nowhere()).dry_run();
        assert_eq!(
            InstallRpmFusion.run(&fixture.ctx()).unwrap(),
            TaskResult::DryRun
        );
        assert!(fixture.executor.calls().is_empty());
    }
}
