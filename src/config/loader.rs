// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .with_project_file(dir)       <dir>/warm.toml, skipped when absent
//!   .add_toml_file(ini)           --ini, must exist
//!   .with_env_prefix("WARM")      WARM_SECTION__KEY
//!   .set_raw("sync.workers=8")    --set and dedicated flags
//!        |
//!        v
//!    build() --> Config::validate() --> Config
//! ```
//!
//! Sources are applied in the order they were added; overrides always come
//! last, after the environment.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "warm.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "WARM";

/// Where a configuration layer came from, as listed by `warm inis`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `warm.toml` found in the project directory.
    Project(PathBuf),
    /// A file given explicitly, e.g. with `--ini`.
    File(PathBuf),
    /// Inline TOML.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(path) => write!(f, "[project] {}", path.display()),
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::Inline => f.write_str("[inline] <string>"),
        }
    }
}

/// Collects configuration layers and builds a validated [`Config`].
#[derive(Debug)]
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    overrides: Vec<(String, config::Value)>,
    sources: Vec<ConfigSource>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            overrides: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Adds `<dir>/warm.toml` if it exists.
    #[must_use]
    pub fn with_project_file(self, dir: &Path) -> Self {
        let path = dir.join(PROJECT_CONFIG_FILE);
        let source = ConfigSource::Project(path.clone());
        self.add_file(&path, false, source)
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        self.add_file(path, true, ConfigSource::File(path.to_path_buf()))
    }

    /// Adds a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        self.add_file(path, false, ConfigSource::File(path.to_path_buf()))
    }

    /// Adds inline TOML content.
    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    fn add_file(mut self, path: &Path, required: bool, source: ConfigSource) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        // Absent optional files contribute nothing and aren't listed.
        if required || path.is_file() {
            self.sources.push(source);
        }
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` variables at build time.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Overrides `key` after every other source.
    #[must_use]
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Self {
        self.overrides.push((key.to_string(), value.into()));
        self
    }

    /// Overrides from a `section.key=value` string as given to `--set`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the option has no `=` or an
    /// empty key.
    pub fn set_raw(self, option: &str) -> std::result::Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            section: "cli".to_string(),
            key: "--set".to_string(),
            message: format!("expected KEY=VALUE, got '{option}'"),
        };
        let (key, value) = option.split_once('=').ok_or_else(invalid)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(invalid());
        }
        Ok(self.set(key, value.trim()))
    }

    /// Merge all layers into a [`Config`] and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing or malformed, a value
    /// has the wrong type, an unknown key is present, or validation fails.
    pub fn build(self) -> Result<Config> {
        let mut builder = self.builder;
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }
        for (key, value) in self.overrides {
            builder = builder
                .set_override(key.as_str(), value)
                .with_context(|| format!("invalid config override '{key}'"))?;
        }

        let config: Config = builder
            .build()
            .and_then(config::Config::try_deserialize)
            .context("failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Layers added so far, lowest priority first.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered source lines for `warm inis`.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}
