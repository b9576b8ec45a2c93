// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version token classification against a remote repository.
//!
//! ```text
//! raw token
//!   contains '+' ---------------------------------> Latest ("+")
//!   otherwise: mirror into scratch (reused if present)
//!     unreachable ---------------------------------> Unreachable
//!     commit id / unique abbreviated id -----------> Commit
//!     local branch name ---------------------------> Branch
//!     tag name ------------------------------------> Tag
//!     nothing -------------------------------------> NoMatch
//! ```
//!
//! The order is fixed: a name that is both a branch and a tag resolves to
//! the branch.

use std::path::Path;
use std::sync::Arc;

use crate::error::WarmResult;
use crate::git::backend::VersionControl;
use crate::manifest::VersionKind;


/// Minimum length of an abbreviated commit id.
pub const MIN_ABBREV_LEN: usize = 7;

/// Outcome of classifying one version token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved { kind: VersionKind, value: String },
    /// The remote could not be mirrored or read.
    Unreachable,
    /// The remote exists but has no matching commit, branch or tag.
    NoMatch,
}

impl Resolution {
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Classifies version tokens using a [`VersionControl`] backend.
#[derive(Clone)]
pub struct VersionResolver {
    vcs: Arc<dyn VersionControl>,
}

impl VersionResolver {
    #[must_use]
    pub fn new(vcs: Arc<dyn VersionControl>) -> Self {
        Self { vcs }
    }

    /// Classify `raw` for the repository at `remote`.
    ///
    /// `scratch` is the per-dependency mirror directory; an existing mirror
    /// there is queried instead of cloning again.
    pub fn resolve(&self, raw: &str, remote: &str, scratch: &Path) -> Resolution {
        let token = raw.trim();
        if token.contains('+') {
            return Resolution::Resolved {
                kind: VersionKind::Latest,
                value: "+".to_string(),
            };
        }

        if self.vcs.is_repo(scratch) {
            tracing::debug!(remote, mirror = %scratch.display(), "reusing mirror");
        } else if let Err(e) = self.vcs.clone_mirror(remote, scratch) {
            tracing::warn!(error = %e, "could not reach {remote}");
            return Resolution::Unreachable;
        }

        match self.classify(token, scratch) {
            Ok(Some(kind)) => Resolution::Resolved {
                kind,
                value: token.to_string(),
            },
            Ok(None) => {
                tracing::warn!("no commit, branch or tag named '{token}' in {remote}");
                Resolution::NoMatch
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read references of {remote}");
                Resolution::Unreachable
            }
        }
    }

    fn classify(&self, token: &str, mirror: &Path) -> WarmResult<Option<VersionKind>> {
        let commits = self.vcs.list_commits(mirror)?;
        if matches_commit(token, &commits) {
            return Ok(Some(VersionKind::Commit));
        }
        if self.vcs.list_branches(mirror)?.iter().any(|b| b == token) {
            return Ok(Some(VersionKind::Branch));
        }
        if self.vcs.list_tags(mirror)?.iter().any(|t| t == token) {
            return Ok(Some(VersionKind::Tag));
        }
        Ok(None)
    }
}

/// Exact commit id, or a hex prefix of at least [`MIN_ABBREV_LEN`] digits
/// that identifies exactly one commit.
#[must_use]
pub fn matches_commit(token: &str, commits: &[String]) -> bool {
    if commits.iter().any(|c| c == token) {
        return true;
    }
    if token.len() < MIN_ABBREV_LEN || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }
    let prefix = token.to_ascii_lowercase();
    commits.iter().filter(|c| c.starts_with(&prefix)).count() == 1
}
