//! Helpers for the file layer: log location, timestamps and ANSI removal.
use std::env;
use std::fs;
use std::path::PathBuf;

/// Directory under the user cache that holds the run logs.
const APP_CACHE_DIR: &str = "fedora-provision";

/// Timestamp written in the log file header.
pub(super) const HEADER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp prefixed to every log line.
pub(super) const LINE_TIME_FORMAT: &str = "%H:%M:%S";

const ESC: char = '\x1b';

/// Log file for `command`: `$XDG_CACHE_HOME/fedora-provision/<command>.log`,
/// falling back to `~/.cache`.
///
/// The directory is created on demand. `None` when no cache location is
/// known or it cannot be created, in which case only the console is used.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = env::var_os("XDG_CACHE_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    let dir = cache.join(APP_CACHE_DIR);
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

/// Remove terminal escape sequences so the log file holds plain text.
///
/// CSI sequences (`ESC [ … final`) are dropped up to and including their
/// final byte; any other escape drops the single character after `ESC`.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut plain = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ESC {
            plain.push(c);
        } else if chars.next_if_eq(&'[').is_some() {
            chars.by_ref().find(|b| ('@'..='~').contains(b));
        } else {
            chars.next();
        }
    }
    plain
}
