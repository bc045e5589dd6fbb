//! URL download resource.
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};

use super::{Applicable, ResourceChange, run_command};
use crate::exec::{Executor, display_command};

/// Download tool preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tool {
    Curl,
    Wget,
}

/// A file fetched from `url` to `dest`, following redirects.
///
/// Uses `curl` when available and falls back to `wget`. No checksum, no
/// retry, and a partially written file is left in place on failure.
pub struct Download<'a> {
    /// Source URL.
    pub url: String,
    /// Destination file.
    pub dest: PathBuf,
    executor: &'a dyn Executor,
}

impl fmt::Debug for Download<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Download")
            .field("url", &self.url)
            .field("dest", &self.dest)
            .finish_non_exhaustive()
    }
}

impl<'a> Download<'a> {
    /// Create a download resource.
    #[must_use]
    pub const fn new(url: String, dest: PathBuf, executor: &'a dyn Executor) -> Self {
        Self {
            url,
            dest,
            executor,
        }
    }

    fn tool(&self) -> Option<Tool> {
        if self.executor.which("curl") {
            Some(Tool::Curl)
        } else if self.executor.which("wget") {
            Some(Tool::Wget)
        } else {
            None
        }
    }

    fn invocation(&self, tool: Tool) -> (&'static str, Vec<String>) {
        let dest = self.dest.to_string_lossy().into_owned();
        match tool {
            Tool::Curl => (
                "curl",
                vec![
                    "-L".to_string(),
                    "-s".to_string(),
                    "--create-dirs".to_string(),
                    "-o".to_string(),
                    dest,
                    self.url.clone(),
                ],
            ),
            Tool::Wget => (
                "wget",
                vec!["-q".to_string(), "-O".to_string(), dest, self.url.clone()],
            ),
        }
    }
}

impl Applicable for Download<'_> {
    fn description(&self) -> String {
        format!("{} → {}", self.url, self.dest.display())
    }

    fn command_line(&self) -> String {
        let (program, args) = self.invocation(self.tool().unwrap_or(Tool::Curl));
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        display_command(program, &args)
    }

    fn apply(&self) -> Result<ResourceChange> {
        let Some(tool) = self.tool() else {
            bail!("curl or wget is required to download {}", self.url);
        };
        if tool == Tool::Wget
            && let Some(parent) = self.dest.parent()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let (program, args) = self.invocation(tool);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_command(self.executor, program, &args)
    }
}
