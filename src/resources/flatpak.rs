//! Flatpak remote and application resources.
use std::fmt;

use anyhow::Result;

use super::{Applicable, ResourceChange, run_command};
use crate::exec::{Executor, display_command};

/// The Flatpak CLI.
pub const FLATPAK: &str = "flatpak";

/// Name of the Flathub remote.
pub const FLATHUB_NAME: &str = "flathub";

/// Repository file of the Flathub remote.
pub const FLATHUB_URL: &str = "https://dl.flathub.org/repo/flathub.flatpakrepo";

/// A Flatpak remote registered with `--if-not-exists`.
pub struct FlatpakRemote<'a> {
    /// Remote name, e.g. `flathub`.
    pub name: String,
    /// `.flatpakrepo` URL.
    pub url: String,
    executor: &'a dyn Executor,
}

impl fmt::Debug for FlatpakRemote<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatpakRemote")
            .field("name", &self.name)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl<'a> FlatpakRemote<'a> {
    /// Create a remote resource.
    #[must_use]
    pub const fn new(name: String, url: String, executor: &'a dyn Executor) -> Self {
        Self {
            name,
            url,
            executor,
        }
    }

    /// The Flathub remote.
    #[must_use]
    pub fn flathub(executor: &'a dyn Executor) -> Self {
        Self::new(FLATHUB_NAME.to_string(), FLATHUB_URL.to_string(), executor)
    }

    fn args(&self) -> [&str; 4] {
        ["remote-add", "--if-not-exists", self.name.as_str(), self.url.as_str()]
    }
}

impl Applicable for FlatpakRemote<'_> {
    fn description(&self) -> String {
        format!("flatpak remote {}", self.name)
    }

    fn command_line(&self) -> String {
        display_command(FLATPAK, &self.args())
    }

    fn apply(&self) -> Result<ResourceChange> {
        run_command(self.executor, FLATPAK, &self.args())
    }
}

/// A Flatpak application installed non-interactively from a remote.
pub struct FlatpakApp<'a> {
    /// Remote to install from.
    pub remote: String,
    /// Application ID, e.g. `org.gimp.GIMP`.
    pub id: String,
    executor: &'a dyn Executor,
}

impl fmt::Debug for FlatpakApp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatpakApp")
            .field("remote", &self.remote)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<'a> FlatpakApp<'a> {
    /// Create an application resource.
    #[must_use]
    pub const fn new(remote: String, id: String, executor: &'a dyn Executor) -> Self {
        Self {
            remote,
            id,
            executor,
        }
    }

    fn args(&self) -> [&str; 4] {
        ["install", "-y", self.remote.as_str(), self.id.as_str()]
    }
}

impl Applicable for FlatpakApp<'_> {
    fn description(&self) -> String {
        format!("{} (flatpak)", self.id)
    }

    fn command_line(&self) -> String {
        display_command(FLATPAK, &self.args())
    }

    fn apply(&self) -> Result<ResourceChange> {
        run_command(self.executor, FLATPAK, &self.args())
    }
}
