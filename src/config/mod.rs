//! `config.json` loading and working-directory layout.
pub mod entries;
pub mod validation;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use entries::{FlatpakEntry, PackageEntry, UrlEntry};

/// Default config file name, relative to the working directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default package folder name, relative to the working directory.
pub const PACKAGE_DIR_NAME: &str = "packages";

/// Extension of installable package archives.
pub const RPM_EXTENSION: &str = ".rpm";

/// Parsed `config.json`.
///
/// Every list is optional and defaults to empty; entries keep declaration
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Native packages installed by name.
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
    /// Flatpak applications installed by ID.
    #[serde(default)]
    pub flatpaks: Vec<FlatpakEntry>,
    /// RPMs downloaded into the package folder.
    #[serde(default)]
    pub urls: Vec<UrlEntry>,
}

impl Config {
    /// Parse config JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed or an
    /// entry lacks a required field.
    pub fn from_json(path: &Path, content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Outcome of looking for the config file.
///
/// The file is read once at startup; each declarative task reports
/// [`ConfigSource::NotFound`] on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// The file exists and parsed successfully.
    Loaded(Config),
    /// No file exists at the given path.
    NotFound(PathBuf),
}

impl ConfigSource {
    /// Load the config file if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Ok(Self::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_json(path, &content).map(Self::Loaded)
    }
}

/// Filesystem locations derived from the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Working directory captured at startup.
    pub root: PathBuf,
    /// Path of `config.json`.
    pub config_file: PathBuf,
    /// Folder scanned for RPMs and used as the download target.
    pub package_dir: PathBuf,
}

impl Paths {
    /// Derive the default layout under `root`, optionally overriding the
    /// config file location.
    #[must_use]
    pub fn new(root: &Path, config_override: Option<&Path>) -> Self {
        Self {
            root: root.to_path_buf(),
            config_file: config_override
                .map_or_else(|| root.join(CONFIG_FILE_NAME), Path::to_path_buf),
            package_dir: root.join(PACKAGE_DIR_NAME),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn load_full_config_in_declaration_order() {
        let (_dir, path) = write_config(
            r#"{
                "packages": [{"name": "vim"}, {"name": "htop"}],
                "flatpaks": [{"name": "GIMP", "id": "org.gimp.GIMP"}],
                "urls": [{"name": "zoom", "url": "https://zoom.us/zoom.rpm"}]
            }"#,
        );
        let ConfigSource::Loaded(config) = ConfigSource::load(&path).unwrap() else {
            panic!("config should be loaded");
        };
        assert_eq!(config.packages[0].name, "vim");
        assert_eq!(config.packages[1].name, "htop");
        assert_eq!(config.flatpaks[0].id, "org.gimp.GIMP");
        assert_eq!(config.urls[0].url, "https://zoom.us/zoom.rpm");
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let (_dir, path) = write_config(r#"{"packages": [{"name": "git"}]}"#);
        let ConfigSource::Loaded(config) = ConfigSource::load(&path).unwrap() else {
            panic!("config should be loaded");
        };
        assert_eq!(config.packages.len(), 1);
        assert!(config.flatpaks.is_empty());
        assert!(config.urls.is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let source = ConfigSource::load(&path).unwrap();
        assert_eq!(source, ConfigSource::NotFound(path));
    }

    #[test]
    fn malformed_json_is_fatal() {
        let (_dir, path) = write_config("{ not json");
        let err = ConfigSource::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn entry_missing_name_is_fatal() {
        let (_dir, path) = write_config(r#"{"urls": [{"url": "https://x/y.rpm"}]}"#);
        assert!(ConfigSource::load(&path).is_err());
    }

    #[test]
    fn paths_default_layout() {
        let paths = Paths::new(Path::new("/work"), None);
        assert_eq!(paths.config_file, PathBuf::from("/work/config.json"));
        assert_eq!(paths.package_dir, PathBuf::from("/work/packages"));
    }

    #[test]
    fn paths_config_override() {
        let paths = Paths::new(Path::new("/work"), Some(Path::new("/etc/provision.json")));
        assert_eq!(paths.config_file, PathBuf::from("/etc/provision.json"));
        assert_eq!(paths.package_dir, PathBuf::from("/work/packages"));
    }
}
