// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for warm-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. warm.toml in the project directory (optional)
//! 3. --ini FILE (repeatable)
//! 4. WARM_* env vars
//! 5. --set KEY=VALUE and dedicated CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! WARM_PATHS__LIBRARIES=/path  → paths.libraries = "/path"
//! WARM_SYNC__WORKERS=8         → sync.workers = 8
//! WARM_GLOBAL__VERBOSE=true    → global.verbose = true
//! ```
//!
//! A double underscore separates section and key so keys like
//! `url_prefix` survive the mapping.

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GlobalConfig, SyncConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Paths configuration.
    pub paths: PathsConfig,
    /// Sync engine settings.
    pub sync: SyncConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use warm::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("warm.toml")
    ///     .with_env_prefix("WARM")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values that serde can't check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero worker count or an
    /// empty file name.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.sync.workers == 0 {
            return Err(invalid_sync_value("workers", "must be at least 1"));
        }
        for (key, value) in [
            ("manifest_file", &self.sync.manifest_file),
            ("properties_file", &self.sync.properties_file),
            ("marker_file", &self.sync.marker_file),
        ] {
            if value.trim().is_empty() {
                return Err(invalid_sync_value(key, "must not be empty"));
            }
            if value.contains(['/', '\\']) {
                return Err(invalid_sync_value(key, "must be a plain file name"));
            }
        }
        Ok(())
    }

    /// Installation root required by the `up` command.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` when `paths.libraries` is unset.
    pub fn require_libraries(&self) -> std::result::Result<&Path, ConfigError> {
        self.paths.libraries()
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_sync_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.verbose".into(), self.global.verbose.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.console_level().as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(&self.global.log_file));
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.project".into(), fmt_path(&self.paths.project));
        options.insert("paths.libraries".into(), fmt_path(&self.paths.libraries));
        options.insert("paths.scratch".into(), fmt_path(&self.paths.scratch));
    }

    fn format_sync_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("sync.workers".into(), self.sync.workers.to_string());
        options.insert("sync.url_prefix".into(), self.sync.url_prefix.clone());
        options.insert(
            "sync.manifest_file".into(),
            self.sync.manifest_file.clone(),
        );
        options.insert(
            "sync.properties_file".into(),
            self.sync.properties_file.clone(),
        );
        options.insert("sync.marker_file".into(), self.sync.marker_file.clone());
    }
}

fn invalid_sync_value(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: "sync".to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn fmt_path(p: &Option<PathBuf>) -> String {
    p.as_ref()
        .map_or_else(String::new, |p| p.display().to_string())
}
