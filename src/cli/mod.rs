// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for warm-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! warm [global options] <command>
//! up        parse, diff, install, report
//! options   print the effective configuration
//! inis      list the configuration files in use
//! version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Git-backed firmware library package manager
///
/// Installs the libraries listed in a project's `dependencies.warm`.
#[derive(Debug, Parser)]
#[command(
    name = "warm",
    author,
    version,
    about = "Git-backed firmware library package manager",
    long_about = "warm-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Reads `dependencies.warm` in the project directory, resolves\n\
                  every `owner/repo: version` line against its Git remote and\n\
                  installs what changed into the libraries directory.\n\n\
                  Run `warm -L path/to/libraries up` to sync a project.",
    after_help = "CONFIGURATION:\n\n\
                  warm reads `warm.toml` from the project directory if present,\n\
                  then every file given with --ini, then WARM_* environment\n\
                  variables (e.g. WARM_PATHS__LIBRARIES=/path), then --set\n\
                  options and dedicated flags. Later sources override earlier ones."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Installs and updates the project's dependencies.
    Up,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files used by warm.
    Inis,

    /// Shows the version.
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
