//! dnf package installation resource.
use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

use super::{Applicable, ResourceChange, run_command};
use crate::exec::{Executor, display_command};

/// The system package manager.
pub const DNF: &str = "dnf";

/// Non-interactive, quiet install flags.
const INSTALL_ARGS: [&str; 3] = ["install", "-y", "-q"];

/// What dnf is asked to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// A package name resolved from the enabled repositories.
    Name(String),
    /// A local `.rpm` file.
    LocalFile(PathBuf),
    /// A remote `.rpm` fetched by dnf itself.
    Url(String),
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::LocalFile(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// A package installed with `dnf install -y -q <source>`.
pub struct DnfPackage<'a> {
    /// What to install.
    pub source: PackageSource,
    executor: &'a dyn Executor,
}

impl fmt::Debug for DnfPackage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnfPackage")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<'a> DnfPackage<'a> {
    /// Create a new package resource.
    #[must_use]
    pub const fn new(source: PackageSource, executor: &'a dyn Executor) -> Self {
        Self { source, executor }
    }

    fn args(&self) -> Vec<String> {
        INSTALL_ARGS
            .iter()
            .map(|s| (*s).to_string())
            .chain(std::iter::once(self.source.to_string()))
            .collect()
    }
}

impl Applicable for DnfPackage<'_> {
    fn description(&self) -> String {
        match &self.source {
            PackageSource::Name(name) => format!("{name} (dnf)"),
            PackageSource::LocalFile(path) => format!("{} (dnf, local file)", path.display()),
            PackageSource::Url(url) => format!("{url} (dnf, remote)"),
        }
    }

    fn command_line(&self) -> String {
        let args = self.args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        display_command(DNF, &args)
    }

    fn apply(&self) -> Result<ResourceChange> {
        let args = self.args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_command(self.executor, DNF, &args)
    }
}
