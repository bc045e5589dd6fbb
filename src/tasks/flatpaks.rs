//! Install Flatpak applications from Flathub.
use anyhow::Result;

use super::{CONFIG_NOT_FOUND, Context, Task, TaskResult, TaskStats, apply_resource};
use crate::resources::flatpak::{FLATHUB_NAME, FlatpakApp};

/// Install every `flatpaks` entry by ID, in declaration order.
#[derive(Debug)]
pub struct InstallFlatpaks;

impl Task for InstallFlatpaks {
    fn name(&self) -> &'static str {
        "Install flatpaks"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let Some(config) = ctx.config_or_report() else {
            return Ok(TaskResult::Skipped(CONFIG_NOT_FOUND.to_string()));
        };
        if config.flatpaks.is_empty() {
            return Ok(TaskResult::Skipped("no flatpaks configured".to_string()));
        }

        let mut stats = TaskStats::new();
        for entry in &config.flatpaks {
            ctx.log.debug(&format!("flatpak {} ({})", entry.name, entry.id));
            let app = FlatpakApp::new(FLATHUB_NAME.to_string(), entry.id.clone(), ctx.executor);
            apply_resource(ctx, &app, "installing", &mut stats);
        }
        Ok(stats.finish(ctx))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::tasks::test_helpers::{Fixture, nowhere};

    #[test]
    fn installs_by_id_in_order() {
        let fixture = Fixture::with_config(
            &nowhere(),
            r#"{"flatpaks": [
                {"name": "GIMP", "id": "org.gimp.GIMP"},
                {"name": "Spotify", "id": "com.spotify.Client"}
            ]}"#,
        );
        assert_eq!(InstallFlatpaks.run(&fixture.ctx()).unwrap(), TaskResult::Ok);
        let calls = fixture.executor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, vec!["install", "-y", "flathub", "org.gimp.GIMP"]);
        assert_eq!(calls[1].1[3], "com.spotify.Client");
    }

    #[test]
    fn missing_config_is_skipped() {
        let fixture = Fixture::without_config(&nowhere());
        let result = InstallFlatpaks.run(&fixture.ctx()).unwrap();
        assert_eq!(result, TaskResult::Skipped(CONFIG_NOT_FOUND.to_string()));
    }

    #[test]
    fn dry_run_logs_without_spawning() {
        let fixture = Fixture::with_config(
            &nowhere(),
            r#"{"flatpaks": [{"name": "GIMP", "id": "org.gimp.GIMP"}]}"#,
        )
        .dry_run();
        assert_eq!(
            InstallFlatpaks.run(&fixture.ctx()).unwrap(),
            TaskResult::DryRun
        );
        assert!(fixture.executor.calls().is_empty());
    }
}
