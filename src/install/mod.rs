// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Concurrent installation of a sync plan.
//!
//! ```text
//! per dependency (one pool task each, span "install"):
//!   1. clone_full        --> <scratch>/warm-XXXX/<name>
//!   2. checkout          (skipped for latest)
//!   3. library.warm      missing --> "not a compatible library"
//!   4. SRC_DIR           relative, inside the clone, existing
//!   5. write marker      into the source directory
//!   6. relocate          reset <libraries>/<name>, move entries
//!   any failure --> InstallOutcome { success: false, error }
//! ```
//!
//! Tasks share no mutable state; a failure never affects siblings.

pub mod properties;


use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bon::Builder;
use serde::Serialize;

use crate::config::types::{DEFAULT_MARKER_FILE, DEFAULT_PROPERTIES_FILE, SyncConfig};
use crate::error::InstallError;
use crate::git::backend::VersionControl;
use crate::manifest::Dependency;
use crate::state::{InstalledMarker, SyncPlan};
use crate::task::{TaskFailure, TaskPool};
use crate::utility::fs::{move_dir_contents, reset_dir};

use properties::{LibraryProperties, resolve_source_dir};

/// Result of installing one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallOutcome {
    pub dependency_name: String,
    pub success: bool,
    /// Short diagnostic, present on failure.
    pub error: Option<String>,
}

impl InstallOutcome {
    #[must_use]
    pub fn success(name: impl Into<String>) -> Self {
        Self {
            dependency_name: name.into(),
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            dependency_name: name.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Installs dependencies into the libraries directory.
#[derive(Clone, Builder)]
pub struct Installer {
    vcs: Arc<dyn VersionControl>,
    /// Installation root; each dependency lands in `<libraries>/<name>`.
    #[builder(into)]
    libraries: PathBuf,
    /// Parent of the per-task scratch directories.
    #[builder(into)]
    scratch_root: PathBuf,
    #[builder(into, default = DEFAULT_PROPERTIES_FILE.to_string())]
    properties_file: String,
    #[builder(into, default = DEFAULT_MARKER_FILE.to_string())]
    marker_file: String,
}

impl Installer {
    /// Installer using the file names from `sync`.
    #[must_use]
    pub fn from_config(
        vcs: Arc<dyn VersionControl>,
        libraries: &Path,
        scratch_root: &Path,
        sync: &SyncConfig,
    ) -> Self {
        Self::builder()
            .vcs(vcs)
            .libraries(libraries)
            .scratch_root(scratch_root)
            .properties_file(sync.properties_file.as_str())
            .marker_file(sync.marker_file.as_str())
            .build()
    }

    #[must_use]
    pub fn libraries(&self) -> &Path {
        &self.libraries
    }

    /// Install every plan entry on `pool`.
    ///
    /// Entries sharing a name write the same target directory, so they run
    /// as one job, one after another in plan order; the last one wins.
    /// Returns one outcome per entry, in plan order.
    pub async fn install_all(&self, pool: &TaskPool, plan: SyncPlan) -> Vec<InstallOutcome> {
        let entries = plan.into_entries();
        let names: Vec<String> = entries.iter().map(|d| d.name.clone()).collect();
        let groups = group_by_name(entries);
        let group_indices: Vec<Vec<usize>> = groups
            .iter()
            .map(|group| group.iter().map(|(index, _)| *index).collect())
            .collect();

        let installer = self.clone();
        let slots = pool
            .run(groups, move |group| {
                group
                    .into_iter()
                    .map(|(index, dependency)| (index, installer.install_one(&dependency)))
                    .collect::<Vec<_>>()
            })
            .await;

        let mut outcomes: Vec<Option<InstallOutcome>> = vec![None; names.len()];
        for (indices, slot) in group_indices.into_iter().zip(slots) {
            match slot {
                Ok(results) => {
                    for (index, outcome) in results {
                        outcomes[index] = Some(outcome);
                    }
                }
                Err(failure) => {
                    for index in indices {
                        tracing::warn!(name = %names[index], "{failure}");
                        outcomes[index] =
                            Some(InstallOutcome::failure(&names[index], failure.to_string()));
                    }
                }
            }
        }

        names
            .into_iter()
            .zip(outcomes)
            .map(|(name, outcome)| {
                outcome.unwrap_or_else(|| {
                    InstallOutcome::failure(name, TaskFailure::NoResult.to_string())
                })
            })
            .collect()
    }

    /// Install one dependency. Never panics on I/O or git failures; they
    /// become a failed outcome.
    #[must_use]
    pub fn install_one(&self, dependency: &Dependency) -> InstallOutcome {
        let span = tracing::info_span!("install", name = %dependency.name);
        let _enter = span.enter();

        match self.try_install(dependency) {
            Ok(()) => {
                tracing::info!(
                    "installed {} ({} {})",
                    dependency.name,
                    dependency.version_kind,
                    dependency.version_value
                );
                InstallOutcome::success(&dependency.name)
            }
            Err(e) => {
                tracing::warn!("{} failed: {e}", dependency.name);
                InstallOutcome::failure(&dependency.name, e.to_string())
            }
        }
    }

    fn try_install(&self, dependency: &Dependency) -> Result<(), InstallError> {
        let scratch = self.scratch_dir()?;
        let clone = scratch.path().join(&dependency.name);

        tracing::debug!(remote = %dependency.source_locator, "cloning");
        self.vcs
            .clone_full(&dependency.source_locator, &clone)
            .map_err(|e| {
                tracing::debug!(error = %e, "clone failed");
                InstallError::CloneFailed {
                    url: dependency.source_locator.clone(),
                }
            })?;

        if let Some(reference) = dependency.checkout_target() {
            self.vcs.checkout(&clone, &reference).map_err(|e| {
                tracing::debug!(error = %e, "checkout failed");
                InstallError::CheckoutFailed {
                    reference: dependency.version_value.clone(),
                }
            })?;
        }

        let properties_path = clone.join(&self.properties_file);
        let not_a_library = || InstallError::NotALibrary {
            file: self.properties_file.clone(),
        };
        if !properties_path.is_file() {
            return Err(not_a_library());
        }
        let properties = LibraryProperties::read(&properties_path).map_err(|e| {
            tracing::debug!(error = %e, "unreadable properties");
            not_a_library()
        })?;
        let source = resolve_source_dir(&clone, properties.src_dir())?;

        InstalledMarker::for_dependency(dependency)
            .write(&source, &self.marker_file)
            .map_err(|e| InstallError::MarkerWrite {
                message: e.to_string(),
            })?;

        let target = self.libraries.join(&dependency.name);
        self.relocate(&source, &target)
    }

    fn scratch_dir(&self) -> Result<tempfile::TempDir, InstallError> {
        let scratch_error = |e: std::io::Error| InstallError::Scratch {
            message: e.to_string(),
        };
        std::fs::create_dir_all(&self.scratch_root).map_err(scratch_error)?;
        tempfile::Builder::new()
            .prefix("warm-")
            .tempdir_in(&self.scratch_root)
            .map_err(scratch_error)
    }

    fn relocate(&self, source: &Path, target: &Path) -> Result<(), InstallError> {
        let moved = reset_dir(target).and_then(|()| move_dir_contents(source, target));
        match moved {
            Ok(count) => {
                tracing::debug!(entries = count, target = %target.display(), "relocated");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "relocation failed");
                // A partial directory must not look installed next run.
                if let Err(e) = std::fs::remove_dir_all(target) {
                    tracing::debug!(error = %e, "failed to remove partial install");
                }
                Err(InstallError::Relocate {
                    target: target.display().to_string(),
                })
            }
        }
    }
}

/// Groups entries by install name, keeping plan order inside each group and
/// ordering groups by first appearance.
fn group_by_name(entries: Vec<Dependency>) -> Vec<Vec<(usize, Dependency)>> {
    let mut groups: Vec<Vec<(usize, Dependency)>> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    for (index, dependency) in entries.into_iter().enumerate() {
        let slot = *by_name.entry(dependency.name.clone()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push((index, dependency));
    }
    groups
}
