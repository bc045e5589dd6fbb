//! Command-line interface definition.
use std::path::PathBuf;

use clap::Parser;

use crate::commands::provision::VERSION;
use crate::platform::OS_RELEASE_PATH;

/// Command-line entry point for the Fedora provisioning tool.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "provision",
    about = "Provision a Fedora workstation: repositories, Flatpaks, local and named packages",
    version = VERSION
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the commands that would run without running them
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Exit non-zero if any installer command fails
    #[arg(long)]
    pub strict: bool,

    /// Working directory holding config.json and packages/ (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Override the config file location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip tasks whose name contains any of these keywords
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only tasks whose name contains any of these keywords
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Release file used for OS detection
    #[arg(long, hide = true, default_value = OS_RELEASE_PATH)]
    pub os_release: PathBuf,
}
