// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Manifest discovery and parsing.
//!
//! ```text
//! dependencies.warm                    Dependency
//!   // comment          (skipped)
//!   owner/repo: 1.0.0  --parse_line--> owner, repo, raw
//!                                         |
//!                      VersionResolver <--+-- remote_url(owner, repo)
//!                             |
//!                             v
//!                      {name, source_locator, version_kind, version_value}
//! ```
//!
//! A malformed line or an unresolvable version is a warning, never a
//! failure; parsing always continues with the next line.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::types::SyncConfig;
use crate::error::{ManifestError, WarmResult};
use crate::resolve::{Resolution, VersionResolver};


/// How a dependency's version token was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionKind {
    Commit,
    Branch,
    Tag,
    Latest,
}

impl VersionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Branch => "branch",
            Self::Tag => "tag",
            Self::Latest => "latest",
        }
    }
}

impl std::fmt::Display for VersionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved manifest line.
///
/// Equality is exact on all four fields; the installed-state differ relies
/// on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Repository name; also the install directory name.
    pub name: String,
    /// Remote URL the library is cloned from.
    pub source_locator: String,
    pub version_kind: VersionKind,
    /// `+` for latest, otherwise the exact commit, branch or tag.
    pub version_value: String,
}

impl Dependency {
    /// Reference handed to `checkout`, qualified so a branch and a tag with
    /// the same name can't be confused. `None` for latest.
    #[must_use]
    pub fn checkout_target(&self) -> Option<String> {
        match self.version_kind {
            VersionKind::Latest => None,
            VersionKind::Commit => Some(self.version_value.clone()),
            VersionKind::Branch => Some(format!("refs/remotes/origin/{}", self.version_value)),
            VersionKind::Tag => Some(format!("refs/tags/{}", self.version_value)),
        }
    }
}

/// Structural pieces of one manifest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub raw_version: &'a str,
}

/// Split `owner/repo: version` into its trimmed segments.
///
/// Returns `None` when a separator is missing, a segment is empty, or the
/// owner or repository isn't a single plain path component (`.`, `..` and
/// nested paths are rejected; both end up in filesystem paths).
#[must_use]
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let (owner, rest) = line.split_once('/')?;
    let (repo, raw_version) = rest.split_once(':')?;
    let (owner, repo, raw_version) = (owner.trim(), repo.trim(), raw_version.trim());
    if raw_version.is_empty() || !is_plain_component(owner) || !is_plain_component(repo) {
        return None;
    }
    Some(ParsedLine {
        owner,
        repo,
        raw_version,
    })
}

fn is_plain_component(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == segment
    )
}

/// Locate the manifest in `dir`.
///
/// Only regular files count. An exact `file_name` match wins; otherwise a
/// single case-insensitive match is accepted, so `Dependencies.warm` still
/// works on case-sensitive filesystems.
///
/// # Errors
///
/// Returns `ManifestError::NotFound` when nothing matches,
/// `ManifestError::Ambiguous` when several entries match only
/// case-insensitively, and `ManifestError::ReadError` when `dir` can't be
/// listed.
pub fn find_manifest(dir: &Path, file_name: &str) -> WarmResult<PathBuf> {
    let exact = dir.join(file_name);
    if exact.is_file() {
        return Ok(exact);
    }

    let read_error = |source| ManifestError::ReadError {
        path: dir.display().to_string(),
        source,
    };
    let mut matches = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let is_file = entry.file_type().map_err(read_error)?.is_file();
        if is_file
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.eq_ignore_ascii_case(file_name))
        {
            matches.push(entry.path());
        }
    }

    match matches.len() {
        0 => Err(ManifestError::NotFound {
            file: file_name.to_string(),
            dir: dir.display().to_string(),
        }
        .into()),
        1 => Ok(matches.remove(0)),
        count => Err(ManifestError::Ambiguous {
            file: file_name.to_string(),
            dir: dir.display().to_string(),
            count,
        }
        .into()),
    }
}

/// Turns manifest text into resolved dependency records.
pub struct ManifestParser<'a> {
    sync: &'a SyncConfig,
    resolver: &'a VersionResolver,
    scratch_root: &'a Path,
}

impl<'a> ManifestParser<'a> {
    /// Create a parser. Mirrors for resolution go under `scratch_root`,
    /// shared by every line of one parse pass.
    #[must_use]
    pub const fn new(
        sync: &'a SyncConfig,
        resolver: &'a VersionResolver,
        scratch_root: &'a Path,
    ) -> Self {
        Self {
            sync,
            resolver,
            scratch_root,
        }
    }

    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::ReadError` if the file can't be read.
    pub fn parse_file(&self, path: &Path) -> WarmResult<Vec<Dependency>> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(self.parse(&content))
    }

    /// Parse manifest text, skipping comments, blank, malformed and
    /// unresolvable lines.
    #[must_use]
    pub fn parse(&self, content: &str) -> Vec<Dependency> {
        let mut dependencies = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            let Some(parsed) = parse_line(line) else {
                tracing::warn!("malformed dependency on line {line_number}");
                continue;
            };

            let remote = self.sync.remote_url(parsed.owner, parsed.repo);
            let scratch = self.scratch_root.join(parsed.owner).join(parsed.repo);
            match self.resolver.resolve(parsed.raw_version, &remote, &scratch) {
                Resolution::Resolved { kind, value } => {
                    tracing::debug!(
                        name = parsed.repo,
                        kind = %kind,
                        version = %value,
                        "resolved dependency"
                    );
                    dependencies.push(Dependency {
                        name: parsed.repo.to_string(),
                        source_locator: remote,
                        version_kind: kind,
                        version_value: value,
                    });
                }
                Resolution::Unreachable | Resolution::NoMatch => {
                    tracing::warn!("malformed version on line {line_number}");
                }
            }
        }
        tracing::info!("found {} dependencies for the current project", dependencies.len());
        dependencies
    }
}
