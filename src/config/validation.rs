//! Non-fatal sanity checks on a loaded [`Config`].
use std::collections::HashSet;

use super::Config;

/// A validation warning detected after configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Config list the item came from (`packages`, `flatpaks`, `urls`).
    pub source: &'static str,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    fn new(source: &'static str, item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source,
            item: item.into(),
            message: message.into(),
        }
    }
}

impl Config {
    /// Check the configuration for likely mistakes.
    ///
    /// Warnings never stop the run; every entry is still processed.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        check_names(
            "packages",
            self.packages.iter().map(|p| p.name.as_str()),
            &mut warnings,
        );
        check_names(
            "flatpaks",
            self.flatpaks.iter().map(|f| f.id.as_str()),
            &mut warnings,
        );
        check_names(
            "urls",
            self.urls.iter().map(|u| u.name.as_str()),
            &mut warnings,
        );

        for entry in &self.urls {
            if !(entry.url.starts_with("https://") || entry.url.starts_with("http://")) {
                warnings.push(ValidationWarning::new(
                    "urls",
                    &entry.name,
                    format!("url is not http(s): {}", entry.url),
                ));
            }
            if !entry.stays_in_package_dir() {
                warnings.push(ValidationWarning::new(
                    "urls",
                    &entry.name,
                    "name escapes the package folder",
                ));
            }
        }

        warnings
    }
}

fn check_names<'a>(
    source: &'static str,
    names: impl Iterator<Item = &'a str>,
    warnings: &mut Vec<ValidationWarning>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            warnings.push(ValidationWarning::new(source, name, "empty identifier"));
        } else if !seen.insert(name) {
            warnings.push(ValidationWarning::new(source, name, "duplicate entry"));
        }
    }
}
