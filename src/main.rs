//! `provision` binary: escalate to root if needed, then run every step.
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use fedora_provision::cli::Cli;
use fedora_provision::exec::SystemExecutor;
use fedora_provision::logging::{self, Logger};
use fedora_provision::{commands, privilege};

/// Log file name under the cache directory.
const COMMAND: &str = "provision";

fn main() -> Result<ExitCode> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose, COMMAND);
    let log = Logger::new(COMMAND);
    let executor = SystemExecutor;

    if !args.dry_run && privilege::needs_escalation() {
        let code = privilege::reexec_as_root(&executor, &log)?;
        return Ok(ExitCode::from(code));
    }

    commands::provision::run(&args, &log, &executor)?;
    Ok(ExitCode::SUCCESS)
}
