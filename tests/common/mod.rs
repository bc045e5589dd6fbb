// Shared helpers for integration tests.
//
// Provides a temporary working directory (config.json, packages/, a release
// file) and a recording executor so each integration test runs the full
// provisioning sequence without touching the host.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use fedora_provision::cli::Cli;
use fedora_provision::exec::{ExecResult, Executor};

/// Release file contents of a Fedora 40 workstation.
pub const FEDORA_40_RELEASE: &str = "NAME=\"Fedora Linux\"\nVERSION_ID=40\nID=fedora\n";

/// An isolated working directory backed by a [`tempfile::TempDir`].
pub struct TestWorkspace {
    /// Temporary working directory.
    pub root: tempfile::TempDir,
}

impl TestWorkspace {
    /// Path to the working directory.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path of the release file written by the builder.
    pub fn release_file(&self) -> PathBuf {
        self.root.path().join("os-release")
    }

    /// Parse a command line rooted at this workspace.
    pub fn cli(&self, extra: &[&str]) -> Cli {
        let root = self.root_path().to_string_lossy().into_owned();
        let release = self.release_file().to_string_lossy().into_owned();
        let mut argv = vec![
            "provision",
            "--root",
            root.as_str(),
            "--os-release",
            release.as_str(),
        ];
        argv.extend_from_slice(extra);
        Cli::parse_from(argv)
    }
}

/// Fluent builder for [`TestWorkspace`].
pub struct WorkspaceBuilder {
    ws: TestWorkspace,
}

impl WorkspaceBuilder {
    /// Begin building a workspace with a Fedora 40 release file and nothing else.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::write(root.path().join("os-release"), FEDORA_40_RELEASE)
            .expect("write os-release");
        Self {
            ws: TestWorkspace { root },
        }
    }

    /// Write `config.json`.
    pub fn with_config(self, json: &str) -> Self {
        std::fs::write(self.ws.root.path().join("config.json"), json).expect("write config.json");
        self
    }

    /// Create an empty file at `packages/<relative>`.
    pub fn with_package_file(self, relative: &str) -> Self {
        let path = self.ws.root.path().join("packages").join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create package parent");
        }
        std::fs::write(&path, "").expect("write package file");
        self
    }

    /// Overwrite the release file.
    pub fn with_release(self, content: &str) -> Self {
        std::fs::write(self.ws.release_file(), content).expect("write os-release");
        self
    }

    /// Finish building and return the workspace.
    pub fn build(self) -> TestWorkspace {
        self.ws
    }
}

/// Executor that records every call and never spawns anything.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    programs: HashSet<String>,
    fail_all: bool,
}

impl RecordingExecutor {
    /// Every call succeeds; `which` finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `which(program)` return `true`.
    pub fn with_program(mut self, program: &str) -> Self {
        self.programs.insert(program.to_string());
        self
    }

    /// Every call exits with status 1.
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// All invocations so far, in order.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Invocations of `program`, arguments only.
    pub fn calls_to(&self, program: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|(p, _)| p == program)
            .map(|(_, args)| args)
            .collect()
    }

    fn record(&self, program: &str, args: &[&str]) -> ExecResult {
        self.calls.lock().expect("calls lock").push((
            program.to_string(),
            args.iter().map(|s| (*s).to_string()).collect(),
        ));
        ExecResult {
            stdout: String::new(),
            stderr: if self.fail_all {
                "simulated failure".to_string()
            } else {
                String::new()
            },
            success: !self.fail_all,
            code: Some(i32::from(self.fail_all)),
        }
    }
}

impl Executor for RecordingExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        Ok(self.record(program, args))
    }

    fn run_inherited(&self, program: &str, args: &[&OsStr]) -> anyhow::Result<ExecResult> {
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        Ok(self.record(program, &args))
    }

    fn which(&self, program: &str) -> bool {
        self.programs.contains(program)
    }
}
