//! Install native packages by name.
use anyhow::Result;

use super::{CONFIG_NOT_FOUND, Context, Task, TaskResult, TaskStats, apply_resource};
use crate::resources::package::{DnfPackage, PackageSource};

/// Install every `packages` entry with its own dnf invocation.
#[derive(Debug)]
pub struct InstallPackages;

impl Task for InstallPackages {
    fn name(&self) -> &'static str {
        "Install packages"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let Some(config) = ctx.config_or_report() else {
            return Ok(TaskResult::Skipped(CONFIG_NOT_FOUND.to_string()));
        };
        if config.packages.is_empty() {
            return Ok(TaskResult::Skipped("no packages configured".to_string()));
        }

        let mut stats = TaskStats::new();
        for entry in &config.packages {
            let pkg = DnfPackage::new(PackageSource::Name(entry.name.clone()), ctx.executor);
            apply_resource(ctx, &pkg, "installing", &mut stats);
        }
        Ok(stats.finish(ctx))
    }
}
