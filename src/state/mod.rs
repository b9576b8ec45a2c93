// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Installed-state marker and sync planning.
//!
//! ```text
//! for each Dependency (manifest order):
//!   <libraries>/<name> missing ------------> sync
//!   marker missing or undecodable ---------> sync
//!   marker != dependency ------------------> sync
//!   marker == dependency ------------------> satisfied
//! ```
//!
//! The marker is plain JSON with a fixed schema. It is the only record of
//! what is installed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FsError, WarmResult};
use crate::manifest::{Dependency, VersionKind};


/// Marker schema version.
pub const MARKER_FORMAT: u32 = 1;

/// On-disk record of an installed dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstalledMarker {
    pub format: u32,
    pub name: String,
    pub source_locator: String,
    pub version_kind: VersionKind,
    pub version_value: String,
}

impl InstalledMarker {
    #[must_use]
    pub fn for_dependency(dependency: &Dependency) -> Self {
        Self {
            format: MARKER_FORMAT,
            name: dependency.name.clone(),
            source_locator: dependency.source_locator.clone(),
            version_kind: dependency.version_kind,
            version_value: dependency.version_value.clone(),
        }
    }

    /// Whether this marker records exactly `dependency`.
    #[must_use]
    pub fn matches(&self, dependency: &Dependency) -> bool {
        self.format == MARKER_FORMAT && self.to_dependency() == *dependency
    }

    #[must_use]
    pub fn to_dependency(&self) -> Dependency {
        Dependency {
            name: self.name.clone(),
            source_locator: self.source_locator.clone(),
            version_kind: self.version_kind,
            version_value: self.version_value.clone(),
        }
    }

    /// Write the marker as `dir/file_name`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `FsError::IoError` if the file can't be written.
    pub fn write(&self, dir: &Path, file_name: &str) -> WarmResult<PathBuf> {
        let path = dir.join(file_name);
        let json = serde_json::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(&path, json).map_err(|source| FsError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }

    /// Read `dir/file_name`.
    ///
    /// Returns `Ok(None)` when the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or decoded.
    pub fn read(dir: &Path, file_name: &str) -> WarmResult<Option<Self>> {
        let path = dir.join(file_name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(FsError::IoError {
                    path: path.display().to_string(),
                    source,
                }
                .into());
            }
        };
        let marker = serde_json::from_str(&content).map_err(|e| FsError::IoError {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        Ok(Some(marker))
    }
}

/// Why a dependency needs installing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncReason {
    /// No library directory.
    Missing,
    /// Directory present, but no marker.
    Untracked,
    /// Marker present but unreadable.
    Unreadable,
    /// Marker records a different source or version.
    Changed,
}

/// Ordered list of dependencies to install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    entries: Vec<Dependency>,
}

impl SyncPlan {
    #[must_use]
    pub fn entries(&self) -> &[Dependency] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<Dependency> {
        self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compares dependency records against what is installed.
pub struct SyncPlanner<'a> {
    libraries: &'a Path,
    marker_file: &'a str,
}

impl<'a> SyncPlanner<'a> {
    #[must_use]
    pub const fn new(libraries: &'a Path, marker_file: &'a str) -> Self {
        Self {
            libraries,
            marker_file,
        }
    }

    /// Install directory of `dependency`.
    #[must_use]
    pub fn target_dir(&self, dependency: &Dependency) -> PathBuf {
        self.libraries.join(&dependency.name)
    }

    /// `None` when `dependency` is already installed as recorded.
    #[must_use]
    pub fn check(&self, dependency: &Dependency) -> Option<SyncReason> {
        let target = self.target_dir(dependency);
        if !target.is_dir() {
            return Some(SyncReason::Missing);
        }
        match InstalledMarker::read(&target, self.marker_file) {
            Ok(None) => Some(SyncReason::Untracked),
            Ok(Some(marker)) if marker.matches(dependency) => None,
            Ok(Some(_)) => Some(SyncReason::Changed),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable marker of {}", dependency.name);
                Some(SyncReason::Unreadable)
            }
        }
    }

    /// Build the plan, keeping manifest order and duplicates.
    #[must_use]
    pub fn plan(&self, dependencies: &[Dependency]) -> SyncPlan {
        let entries = dependencies
            .iter()
            .filter(|dependency| match self.check(dependency) {
                Some(reason) => {
                    tracing::debug!(name = %dependency.name, ?reason, "needs sync");
                    true
                }
                None => {
                    tracing::debug!(name = %dependency.name, "up to date");
                    false
                }
            })
            .cloned()
            .collect();
        SyncPlan { entries }
    }
}
