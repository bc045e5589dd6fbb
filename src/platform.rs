//! Host identification from `/etc/os-release` and the desktop session.
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::PlatformError;

/// Default location of the OS release file.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Environment variable naming the running desktop environment.
pub const DESKTOP_ENV_VAR: &str = "XDG_CURRENT_DESKTOP";

/// Key/value pairs parsed from an os-release file.
///
/// # Examples
///
/// ```
/// use fedora_provision::platform::ReleaseInfo;
///
/// let info = ReleaseInfo::parse("NAME=\"Fedora Linux\"\nVERSION_ID=40\n");
/// assert_eq!(info.get("NAME"), Some("Fedora Linux"));
/// assert_eq!(info.get("VERSION_ID"), Some("40"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseInfo {
    values: HashMap<String, String>,
}

impl ReleaseInfo {
    /// Parse `KEY=VALUE` lines. Surrounding single or double quotes are
    /// stripped from values; blank lines, comments and lines without `=`
    /// are ignored.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let values = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
            .collect();
        Self { values }
    }

    /// Read and parse a release file.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::ReleaseFile`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, PlatformError> {
        let content = std::fs::read_to_string(path).map_err(|source| PlatformError::ReleaseFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Look up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn require(&self, key: &str) -> Result<&str, PlatformError> {
        self.get(key)
            .ok_or_else(|| PlatformError::MissingKey(key.to_string()))
    }
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)))
        .unwrap_or(value)
}

/// Identity of the host being provisioned.
///
/// Built once at startup and passed by reference to every task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Distribution display name (`NAME`).
    pub name: String,
    /// Distribution version (`VERSION_ID`), e.g. `40`.
    pub version_id: String,
    /// Desktop environment, if a graphical session is active.
    pub desktop: Option<String>,
}

impl Platform {
    /// Build a platform from parsed release info.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MissingKey`] if `NAME` or `VERSION_ID` is absent.
    pub fn from_release(info: &ReleaseInfo, desktop: Option<String>) -> Result<Self, PlatformError> {
        Ok(Self {
            name: info.require("NAME")?.to_string(),
            version_id: info.require("VERSION_ID")?.to_string(),
            desktop: desktop.filter(|d| !d.is_empty()),
        })
    }

    /// Detect the current platform from the given release file and the
    /// `XDG_CURRENT_DESKTOP` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the release file is unreadable or incomplete.
    pub fn detect(release_file: &Path) -> Result<Self, PlatformError> {
        let info = ReleaseInfo::load(release_file)?;
        Self::from_release(&info, std::env::var(DESKTOP_ENV_VAR).ok())
    }

    /// Desktop environment for display, `unset` when absent.
    #[must_use]
    pub fn desktop_display(&self) -> &str {
        self.desktop.as_deref().unwrap_or("unset")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version_id)
    }
}
