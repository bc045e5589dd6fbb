//! Top-level command orchestration.
pub mod provision;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::config::{ConfigSource, Paths};
use crate::logging::Logger;
use crate::platform::Platform;
use crate::tasks::{self, Context, Task};

/// Environment variable naming the working directory when `--root` is absent.
pub const ROOT_ENV_VAR: &str = "PROVISION_ROOT";

/// Shared state produced by the common command setup sequence.
///
/// Platform detection and config loading happen exactly once; every task
/// borrows the result.
#[derive(Debug)]
pub struct CommandSetup {
    /// Detected host identity.
    pub platform: Platform,
    /// Working-directory layout.
    pub paths: Paths,
    /// Parsed `config.json`, or where it was expected.
    pub config: ConfigSource,
}

impl CommandSetup {
    /// Detect the platform, resolve the working directory and load the config.
    ///
    /// # Errors
    ///
    /// Returns an error if the release file is unreadable or incomplete, the
    /// working directory cannot be determined, or `config.json` exists but
    /// cannot be parsed.
    pub fn init(cli: &Cli, log: &Logger) -> Result<Self> {
        log.stage("Detecting platform");
        let platform = Platform::detect(&cli.os_release)
            .with_context(|| format!("detecting platform from {}", cli.os_release.display()))?;
        log.info(&format!("Detected OS: {}", platform.name));
        log.info(&format!(
            "Detected Desktop Environment: {}",
            platform.desktop_display()
        ));
        log.debug(&format!("version: {}", platform.version_id));

        let root = resolve_root(cli.root.as_deref(), std::env::var(ROOT_ENV_VAR).ok())?;
        let paths = Paths::new(&root, cli.config.as_deref());
        log.debug(&format!("root: {}", paths.root.display()));

        log.stage("Loading configuration");
        let config = ConfigSource::load(&paths.config_file)?;
        match &config {
            ConfigSource::Loaded(cfg) => {
                log.info(&format!(
                    "loaded {} packages, {} flatpaks, {} urls",
                    cfg.packages.len(),
                    cfg.flatpaks.len(),
                    cfg.urls.len()
                ));

                let warnings = cfg.validate();
                if !warnings.is_empty() {
                    log.warn(&format!(
                        "found {} configuration warning(s):",
                        warnings.len()
                    ));
                    for warning in &warnings {
                        log.warn(&format!(
                            "  {} [{}]: {}",
                            warning.source, warning.item, warning.message
                        ));
                    }
                }
            }
            ConfigSource::NotFound(path) => {
                log.info(&format!("config file not found: {}", path.display()));
            }
        }

        Ok(Self {
            platform,
            paths,
            config,
        })
    }
}

/// Execute the selected tasks in order, record filtered ones, and print the
/// summary.
pub fn run_tasks_to_completion(
    all_tasks: &[Box<dyn Task>],
    skip: &[String],
    only: &[String],
    ctx: &Context<'_>,
    log: &Logger,
) {
    for task in all_tasks.iter().map(AsRef::as_ref) {
        if tasks::is_selected(task, skip, only) {
            tasks::execute(task, ctx);
        } else {
            tasks::record_filtered(task, ctx);
        }
    }

    log.print_summary();
}

/// Resolve the working directory: explicit `--root`, then `PROVISION_ROOT`,
/// then the current directory.
///
/// # Errors
///
/// Returns an error if the current directory is needed and cannot be read.
pub fn resolve_root(explicit: Option<&Path>, env_root: Option<String>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }
    if let Some(root) = env_root.filter(|r| !r.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    std::env::current_dir().context("reading current directory")
}
