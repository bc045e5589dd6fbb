//! Fedora workstation provisioning engine.
//!
//! Brings a fresh Fedora install to a declared state by driving `dnf` and
//! `flatpak`: the jq prerequisite, the RPM Fusion repositories, the Flathub
//! remote, RPMs downloaded from URLs, local RPMs, Flatpak applications and
//! named packages, in that order, driven by `config.json` and the
//! `packages/` folder of the working directory.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: parse and validate `config.json`
//! - **[`resources`]**: one external command each (dnf package, flatpak app, download)
//! - **[`tasks`]**: named provisioning steps wired to resources
//! - **[`commands`]**: setup and orchestration of a full run
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod privilege;
pub mod resources;
pub mod tasks;
