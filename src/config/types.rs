// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for warm-rs.
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, SyncConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default number of concurrent install workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Default manifest file name looked up in the project directory.
pub const DEFAULT_MANIFEST_FILE: &str = "dependencies.warm";

/// Default properties file looked up at the root of every cloned library.
pub const DEFAULT_PROPERTIES_FILE: &str = "library.warm";

/// Default installed-state marker file name.
pub const DEFAULT_MARKER_FILE: &str = ".warm-state.json";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Emit informational log lines on the console.
    pub verbose: bool,
    /// Explicit console log level (0-6), overrides `verbose` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_log_level: Option<LogLevel>,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            output_log_level: None,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

impl GlobalConfig {
    /// Effective console level.
    #[must_use]
    pub fn console_level(&self) -> LogLevel {
        self.output_log_level
            .unwrap_or_else(|| LogLevel::for_verbosity(self.verbose))
    }
}

/// Dependency synchronisation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Number of dependencies installed concurrently.
    pub workers: usize,
    /// Prefix used to build remote URLs from `owner/repo`.
    pub url_prefix: String,
    /// Manifest file name.
    pub manifest_file: String,
    /// Library properties file name.
    pub properties_file: String,
    /// Installed-state marker file name.
    pub marker_file: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            url_prefix: "https://github.com/".to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            properties_file: DEFAULT_PROPERTIES_FILE.to_string(),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
        }
    }
}

impl SyncConfig {
    /// Remote URL for `owner/repo`.
    ///
    /// A prefix not ending in `/` or `:` gets a `/`, so
    /// `https://github.com`, `https://github.com/` and `git@github.com:`
    /// all work.
    #[must_use]
    pub fn remote_url(&self, owner: &str, repo: &str) -> String {
        let sep = if self.url_prefix.ends_with(['/', ':']) {
            ""
        } else {
            "/"
        };
        format!("{}{sep}{owner}/{repo}.git", self.url_prefix)
    }
}
