//! Download RPMs listed under `urls` into the package folder.
use anyhow::Result;

use super::{CONFIG_NOT_FOUND, Context, Task, TaskResult, TaskStats, apply_resource};
use crate::resources::download::Download;

/// Fetch every `urls` entry to `<package dir>/<name>.rpm`.
#[derive(Debug)]
pub struct DownloadUrlPackages;

impl Task for DownloadUrlPackages {
    fn name(&self) -> &'static str {
        "Download URL packages"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let Some(config) = ctx.config_or_report() else {
            return Ok(TaskResult::Skipped(CONFIG_NOT_FOUND.to_string()));
        };
        if config.urls.is_empty() {
            return Ok(TaskResult::Skipped("no urls configured".to_string()));
        }

        let mut stats = TaskStats::new();
        for entry in &config.urls {
            if !entry.stays_in_package_dir() {
                ctx.log.warn(&format!(
                    "{}: name escapes the package folder, not downloading",
                    entry.name
                ));
                stats.failed += 1;
                continue;
            }
            let dest = ctx.paths.package_dir.join(entry.file_name());
            let download = Download::new(entry.url.clone(), dest, ctx.executor);
            apply_resource(ctx, &download, "downloading", &mut stats);
        }
        Ok(stats.finish(ctx))
    }
}
