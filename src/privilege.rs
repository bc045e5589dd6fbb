//! Root detection and one-shot re-invocation through `sudo`.
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::commands::ROOT_ENV_VAR;
use crate::error::PrivilegeError;
use crate::exec::Executor;
use crate::logging::Log;

/// Privilege escalation helper.
pub const SUDO: &str = "sudo";

/// Exit status of the unprivileged invocation, whatever the elevated child did.
pub const ESCALATION_EXIT_CODE: u8 = 1;

/// Variables the elevated run reads that `sudo`'s `env_reset` would drop.
pub const FORWARDED_ENV: [&str; 1] = [ROOT_ENV_VAR];

/// Whether the process lacks root privileges.
#[must_use]
pub fn needs_escalation() -> bool {
    matches!(sudo::check(), sudo::RunningAs::User)
}

/// Arguments of the current invocation, program name excluded, as given.
#[must_use]
pub fn forwarded_args() -> Vec<OsString> {
    env::args_os().skip(1).collect()
}

/// Names from [`FORWARDED_ENV`] that are set in this process.
#[must_use]
pub fn set_forwarded_env() -> Vec<&'static str> {
    FORWARDED_ENV
        .into_iter()
        .filter(|name| env::var_os(name).is_some())
        .collect()
}

/// Run `sudo [--preserve-env=…] <exe> <args…>` once with the terminal
/// attached and return the exit status this process should end with.
///
/// `preserve_env` lists variables to keep across `sudo`; `args` are passed
/// through byte for byte. The child's own status is logged but not
/// propagated.
pub fn escalate(
    executor: &dyn Executor,
    exe: &Path,
    args: &[OsString],
    preserve_env: &[&str],
    log: &dyn Log,
) -> u8 {
    log.warn("This script must be run as root");

    let preserve = (!preserve_env.is_empty())
        .then(|| OsString::from(format!("--preserve-env={}", preserve_env.join(","))));
    let argv: Vec<&OsStr> = preserve
        .iter()
        .map(OsString::as_os_str)
        .chain(std::iter::once(exe.as_os_str()))
        .chain(args.iter().map(OsString::as_os_str))
        .collect();
    let shown: Vec<String> = argv.iter().map(|a| a.to_string_lossy().into_owned()).collect();
    log.info(&format!("re-running: {SUDO} {}", shown.join(" ")));

    match executor.run_inherited(SUDO, &argv) {
        Ok(result) if result.success => log.debug("elevated run finished"),
        Ok(result) => log.debug(&format!(
            "elevated run failed: {}",
            result.failure_reason()
        )),
        Err(e) => log.error(&format!("cannot run {SUDO}: {e:#}")),
    }
    ESCALATION_EXIT_CODE
}

/// Re-invoke the current executable with its current arguments via `sudo`,
/// keeping any set [`FORWARDED_ENV`] variables.
///
/// # Errors
///
/// Returns an error if the executable path cannot be determined.
pub fn reexec_as_root(executor: &dyn Executor, log: &dyn Log) -> Result<u8, PrivilegeError> {
    let exe = env::current_exe().map_err(PrivilegeError::CurrentExe)?;
    Ok(escalate(
        executor,
        &exe,
        &forwarded_args(),
        &set_forwarded_env(),
        log,
    ))
}
