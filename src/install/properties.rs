// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library properties file (`library.warm`).
//!
//! ```text
//! // comment
//! SRC_DIR=src        source subdirectory to install, default: clone root
//! ```

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use regex::Regex;

use crate::error::{InstallError, Result};

/// Key selecting the installed subdirectory.
pub const SRC_DIR_KEY: &str = "SRC_DIR";

/// Parsed `KEY=VALUE` pairs of a properties file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryProperties {
    values: BTreeMap<String, String>,
}

impl LibraryProperties {
    /// Parse properties text. `//` comments and lines that aren't
    /// `KEY=VALUE` are skipped; a repeated key keeps its last value.
    ///
    /// # Errors
    ///
    /// Returns an error if the line pattern fails to compile.
    pub fn parse(content: &str) -> Result<Self> {
        let line_regex = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)[ \t]*=[ \t]*([^\r\n]*?)[ \t]*$")
            .context("failed to compile properties pattern")?;

        let mut values = BTreeMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            match line_regex.captures(line) {
                Some(caps) => {
                    values.insert(caps[1].to_string(), caps[2].to_string());
                }
                None => tracing::debug!("skipping properties line '{line}'"),
            }
        }
        Ok(Self { values })
    }

    /// Read and parse the properties file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// `SRC_DIR`, if set to a non-empty value.
    #[must_use]
    pub fn src_dir(&self) -> Option<&str> {
        self.get(SRC_DIR_KEY).filter(|dir| !dir.is_empty())
    }
}

/// Directory to install from: `clone_root` joined with `src_dir`.
///
/// # Errors
///
/// Returns `InstallError::InvalidSourceDir` if `src_dir` is absolute,
/// climbs out of the clone, or doesn't name an existing directory.
pub fn resolve_source_dir(
    clone_root: &Path,
    src_dir: Option<&str>,
) -> std::result::Result<PathBuf, InstallError> {
    let Some(dir) = src_dir else {
        return Ok(clone_root.to_path_buf());
    };
    let invalid = || InstallError::InvalidSourceDir {
        dir: dir.to_string(),
    };

    let relative = Path::new(dir);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(invalid());
    }

    let source = clone_root.join(relative);
    if !source.is_dir() {
        return Err(invalid());
    }
    // Symlinks inside the clone must not lead outside it either.
    let root = clone_root.canonicalize().map_err(|_| invalid())?;
    let resolved = source.canonicalize().map_err(|_| invalid())?;
    if !resolved.starts_with(&root) {
        return Err(invalid());
    }
    Ok(source)
}
