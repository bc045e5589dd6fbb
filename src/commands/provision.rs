//! The `provision` run: setup, every step in order, summary and exit policy.
use anyhow::{Result, bail};

use super::{CommandSetup, run_tasks_to_completion};
use crate::cli::Cli;
use crate::exec::Executor;
use crate::logging::Logger;
use crate::tasks::{self, Context};

/// Version string baked in at build time.
pub const VERSION: &str = match option_env!("PROVISION_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Run the full provisioning sequence.
///
/// Installer commands that exit non-zero are logged and counted; they only
/// fail the run when `--strict` is given.
///
/// # Errors
///
/// Returns an error if setup fails (platform detection, working directory,
/// malformed config) or, under `--strict`, if any task or installer command
/// failed.
pub fn run(cli: &Cli, log: &Logger, executor: &dyn Executor) -> Result<()> {
    log.info(&format!("fedora-provision {VERSION}"));

    let setup = CommandSetup::init(cli, log)?;
    let ctx = Context {
        platform: &setup.platform,
        config: &setup.config,
        paths: &setup.paths,
        log,
        executor,
        dry_run: cli.dry_run,
    };

    let all_tasks = tasks::all_provision_tasks();
    run_tasks_to_completion(&all_tasks, &cli.skip, &cli.only, &ctx, log);

    let failed = log.failure_count();
    let partial = log.partial_count();
    if failed + partial == 0 {
        return Ok(());
    }
    if cli.strict {
        bail!("{failed} task(s) failed, {partial} task(s) had failing commands");
    }
    log.warn(&format!(
        "{failed} task(s) failed, {partial} task(s) had failing commands"
    ));
    Ok(())
}
