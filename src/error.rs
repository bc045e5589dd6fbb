//! Domain-specific error types for the provisioning engine.
//!
//! Internal modules return typed errors (e.g. [`ConfigError`],
//! [`PlatformError`]) while the command layer converts them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! - [`ConfigError`]: `config.json` read / parse failures
//! - [`PlatformError`]: `/etc/os-release` detection failures
//! - [`PrivilegeError`]: self re-invocation through `sudo`
//!
//! Non-zero exit codes from external commands are *not*
//! errors: they are captured in [`ExecResult`](crate::exec::ExecResult)
//! and counted in the run summary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from loading `config.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON or does not match the expected shape.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },
}

/// Errors that arise while reading the OS release file.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The release file could not be read.
    #[error("cannot read release file {}: {source}", path.display())]
    ReleaseFile {
        /// Path of the release file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A required key is absent from the release file.
    #[error("release file is missing required key {0}")]
    MissingKey(String),
}

/// Errors that prevent the sudo re-invocation from being attempted.
#[derive(Error, Debug)]
pub enum PrivilegeError {
    /// The path of the running executable is unknown.
    #[error("cannot locate current executable: {0}")]
    CurrentExe(#[source] std::io::Error),
}
