//! Install every `.rpm` file found under the package folder.
use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use super::{Context, Task, TaskResult, TaskStats, apply_resource};
use crate::config::RPM_EXTENSION;
use crate::resources::package::{DnfPackage, PackageSource};

/// Outcome of walking the package folder.
#[derive(Debug, Default)]
pub struct RpmScan {
    /// Matching files, in walk order.
    pub files: Vec<PathBuf>,
    /// Entries that could not be read; the walk continues past them.
    pub errors: Vec<walkdir::Error>,
}

/// Files below `dir` whose name ends in `.rpm`, at any depth.
///
/// Symlinks to files count as files; symlinked directories are not
/// descended into. Entries are visited in file-name order per directory. A
/// missing `dir` yields an empty scan.
#[must_use]
pub fn find_rpm_files(dir: &Path) -> RpmScan {
    let mut scan = RpmScan::default();
    if !dir.is_dir() {
        return scan;
    }
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.path().is_file()
                    && entry.file_name().to_string_lossy().ends_with(RPM_EXTENSION)
                {
                    scan.files.push(entry.into_path());
                }
            }
            Err(e) => scan.errors.push(e),
        }
    }
    scan
}

/// Install local RPMs one at a time with dnf.
#[derive(Debug)]
pub struct InstallLocalPackages;

impl Task for InstallLocalPackages {
    fn name(&self) -> &'static str {
        "Install local packages"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let RpmScan { files, errors } = find_rpm_files(&ctx.paths.package_dir);
        for error in &errors {
            ctx.log.warn(&format!("cannot read package folder entry: {error}"));
        }
        if files.is_empty() {
            return Ok(TaskResult::Skipped(format!(
                "no {RPM_EXTENSION} files in {}",
                ctx.paths.package_dir.display()
            )));
        }
        ctx.log.debug(&format!("{} local package(s) found", files.len()));

        let mut stats = TaskStats::new();
        for file in files {
            let pkg = DnfPackage::new(PackageSource::LocalFile(file), ctx.executor);
            apply_resource(ctx, &pkg, "installing", &mut stats);
        }
        Ok(stats.finish(ctx))
    }
}
