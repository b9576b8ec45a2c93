// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! project/                 (manifest lives here, default: cwd)
//!   dependencies.warm
//! libraries/               (installation root, required)
//!   <repo>/
//!     .warm-state.json
//! scratch/                 (optional, default: system temp dir)
//!   warm-resolve-XXXX/<owner>/<repo>   mirrors
//!   warm-install-XXXX/                 working clones
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Filesystem locations used by a sync run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Project directory holding the manifest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<PathBuf>,
    /// Installation root; every dependency lands in `libraries/<name>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libraries: Option<PathBuf>,
    /// Parent directory for scratch clones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch: Option<PathBuf>,
}

impl PathsConfig {
    /// Installation root, or a `MissingKey` error when unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if `paths.libraries` is not configured.
    pub fn libraries(&self) -> Result<&Path, ConfigError> {
        self.libraries
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| ConfigError::MissingKey {
                section: "paths".to_string(),
                key: "libraries".to_string(),
            })
    }

    /// Project directory, defaulting to the current directory.
    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.project.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Scratch parent directory, defaulting to the system temp directory.
    #[must_use]
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch.clone().unwrap_or_else(std::env::temp_dir)
    }
}
