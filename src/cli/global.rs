// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --verbose         ← Informational console output
//! --log-level N     ← Console verbosity (0-6), beats --verbose
//! --log-file FILE   ← Also log to FILE
//! --project DIR     ← paths.project override
//! --libraries DIR   ← paths.libraries override
//! --jobs N          ← sync.workers override
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: CLI flags > --set > env > --ini > warm.toml > defaults
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Emit informational log lines, not only warnings and errors.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Project directory containing the manifest (default: current directory).
    #[arg(short = 'C', long = "project", value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Directory the libraries are installed into.
    #[arg(short = 'L', long = "libraries", value_name = "DIR")]
    pub libraries: Option<PathBuf>,

    /// Number of dependencies installed concurrently.
    #[arg(short = 'j', long = "jobs", value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Sets an option, such as 'sync.url_prefix=git@github.com:'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,
}

impl GlobalOptions {
    /// Converts command-line options to `section.key=value` overrides.
    ///
    /// `--set` options come first so dedicated flags win.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if self.verbose {
            overrides.push("global.verbose=true".to_string());
        }

        if let Some(level) = self.log_level {
            overrides.push(format!("global.output_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global.log_file={}", path.display()));
        }

        if let Some(ref project) = self.project {
            overrides.push(format!("paths.project={}", project.display()));
        }

        if let Some(ref libraries) = self.libraries {
            overrides.push(format!("paths.libraries={}", libraries.display()));
        }

        if let Some(jobs) = self.jobs {
            overrides.push(format!("sync.workers={jobs}"));
        }

        overrides
    }

    /// Project directory given on the command line, or the current one.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        self.project.as_deref().unwrap_or_else(|| Path::new("."))
    }
}
