//! Entry types declared in `config.json`.
use std::path::{Component, Path};

use serde::Deserialize;

/// A native package installed with dnf by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageEntry {
    /// Package name passed to `dnf install`.
    pub name: String,
}

/// A Flatpak application installed from Flathub.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlatpakEntry {
    /// Human-readable application name (display only).
    pub name: String,
    /// Application ID passed to `flatpak install`, e.g. `org.gimp.GIMP`.
    pub id: String,
}

/// An RPM downloaded from a URL into the package folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlEntry {
    /// File stem; the download is saved as `<name>.rpm`.
    pub name: String,
    /// Source URL.
    pub url: String,
}

impl UrlEntry {
    /// File name the download is stored under.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, super::RPM_EXTENSION)
    }

    /// Whether the download stays inside the package folder.
    ///
    /// Subfolders such as `vendor/zoom` are fine; `..` components and
    /// absolute names are not.
    #[must_use]
    pub fn stays_in_package_dir(&self) -> bool {
        Path::new(&self.name)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }
}
