// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//!                 VersionControl (capability)
//!                          |
//!                     GitBackend
//!                     /        \
//!      refs (read)   v          v   clone/checkout (write)
//!             GixBackend      ShellBackend
//!             pure Rust gix   git CLI
//! ```
//!
//! Every call takes explicit paths; the process working directory is never
//! touched, so calls are safe from concurrent install tasks.

use crate::error::{GitError, GixError, WarmResult};
use std::path::{Path, PathBuf};

/// Version-control capability used by the resolver and the installer.
///
/// Implementations may shell out or bind a library; tests substitute fakes.
pub trait VersionControl: Send + Sync {
    /// Reference-complete, non-checked-out mirror of `remote` in `dest`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote is unreachable or not a repository.
    fn clone_mirror(&self, remote: &str, dest: &Path) -> WarmResult<()>;

    /// Full working clone of `remote` in `dest`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the clone fails.
    fn clone_full(&self, remote: &str, dest: &Path) -> WarmResult<()>;

    /// Check out a branch, tag, or commit inside a working clone.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the reference does not exist.
    fn checkout(&self, repo: &Path, reference: &str) -> WarmResult<()>;

    /// Every commit id reachable from any reference.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository can't be read.
    fn list_commits(&self, repo: &Path) -> WarmResult<Vec<String>>;

    /// Local branch names, without the current-branch marker.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository can't be read.
    fn list_branches(&self, repo: &Path) -> WarmResult<Vec<String>>;

    /// Tag names.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository can't be read.
    fn list_tags(&self, repo: &Path) -> WarmResult<Vec<String>>;

    /// Whether `path` already holds a repository this backend can query.
    fn is_repo(&self, path: &Path) -> bool;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Enumerates references without spawning subprocesses. Works on bare
/// mirrors, which is all the resolver needs.
pub struct GixBackend;

impl GixBackend {
    fn open(path: &Path) -> WarmResult<gix::Repository> {
        Ok(gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))))?)
    }

    fn reference_names(path: &Path, tags: bool) -> WarmResult<Vec<String>> {
        let repo = Self::open(path)?;
        let platform = repo
            .references()
            .map_err(|e| GitError::Gix(GixError::References(e.to_string())))?;
        let iter = if tags {
            platform.tags()
        } else {
            platform.local_branches()
        }
        .map_err(|e| GitError::Gix(GixError::References(e.to_string())))?;

        let mut names = Vec::new();
        for reference in iter {
            let reference =
                reference.map_err(|e| GitError::Gix(GixError::Reference(e.to_string())))?;
            names.push(reference.name().shorten().to_string());
        }
        names.sort();
        Ok(names)
    }

    #[must_use]
    pub fn is_git_repo(path: &Path) -> bool {
        gix::open(path).is_ok()
    }

    /// Branch names under `refs/heads`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository can't be opened or its
    /// references can't be read.
    pub fn list_branches(path: &Path) -> WarmResult<Vec<String>> {
        Self::reference_names(path, false)
    }

    /// Tag names under `refs/tags`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository can't be opened or its
    /// references can't be read.
    pub fn list_tags(path: &Path) -> WarmResult<Vec<String>> {
        Self::reference_names(path, true)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
///
/// Required for network transports (HTTPS credentials, SSH agents) and
/// checkouts with submodules.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    git: PathBuf,
}

impl ShellBackend {
    /// Locate `git` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::GitNotFound` if no git executable is found.
    pub fn new() -> WarmResult<Self> {
        let git = which::which("git").map_err(|e| GitError::GitNotFound {
            message: e.to_string(),
        })?;
        Ok(Self { git })
    }

    /// Use a specific git executable.
    #[must_use]
    pub fn with_executable(git: impl Into<PathBuf>) -> Self {
        Self { git: git.into() }
    }

    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(&self, args: &[&str], cwd: &Path) -> WarmResult<String> {
        use std::process::Command;

        tracing::trace!(cwd = %cwd.display(), "git {}", args.join(" "));

        let output = Command::new(&self.git)
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn clone_into(&self, remote: &str, dest: &Path, extra: &[&str]) -> WarmResult<()> {
        let dest_str = dest.to_str().ok_or_else(|| GitError::CloneFailed {
            url: remote.to_string(),
            message: "invalid destination path".to_string(),
        })?;
        let mut args = vec!["clone", "--quiet"];
        args.extend(&["-c", "advice.detachedHead=false"]);
        args.extend(extra);
        args.extend(&["--", remote, dest_str]);

        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;
        self.git_command(&args, parent)
            .map_err(|e| GitError::CloneFailed {
                url: remote.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}

impl VersionControl for ShellBackend {
    fn clone_mirror(&self, remote: &str, dest: &Path) -> WarmResult<()> {
        self.clone_into(remote, dest, &["--mirror"])
    }

    fn clone_full(&self, remote: &str, dest: &Path) -> WarmResult<()> {
        self.clone_into(remote, dest, &["--recurse-submodules"])
    }

    fn checkout(&self, repo: &Path, reference: &str) -> WarmResult<()> {
        self.git_command(
            &["-c", "advice.detachedHead=false", "checkout", "-q", reference],
            repo,
        )
        .map_err(|e| GitError::CheckoutFailed {
            what: reference.to_string(),
            message: e.to_string(),
        })?;
        // Submodules follow the checked-out revision; a failure here is not
        // fatal for libraries without submodules.
        if let Err(e) = self.git_command(
            &["submodule", "update", "--init", "--recursive", "--quiet"],
            repo,
        ) {
            tracing::debug!(error = %e, "submodule update failed");
        }
        Ok(())
    }

    fn list_commits(&self, repo: &Path) -> WarmResult<Vec<String>> {
        let output = self.git_command(&["rev-list", "--all"], repo)?;
        Ok(output.lines().map(str::trim).map(String::from).collect())
    }

    fn list_branches(&self, repo: &Path) -> WarmResult<Vec<String>> {
        let output = self.git_command(&["branch", "--list"], repo)?;
        let mut branches: Vec<String> = output.lines().filter_map(parse_branch_line).collect();
        branches.sort();
        Ok(branches)
    }

    fn list_tags(&self, repo: &Path) -> WarmResult<Vec<String>> {
        let output = self.git_command(&["tag", "--list"], repo)?;
        let mut tags: Vec<String> = output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        tags.sort();
        Ok(tags)
    }

    fn is_repo(&self, path: &Path) -> bool {
        path.is_dir() && self.git_command(&["rev-parse", "--git-dir"], path).is_ok()
    }
}

/// Strip the `*` (current) and `+` (checked out in a worktree) markers and
/// surrounding whitespace from one line of `git branch` output.
///
/// Detached-HEAD pseudo entries like `(HEAD detached at 1a2b3c)` are dropped.
#[must_use]
pub fn parse_branch_line(line: &str) -> Option<String> {
    let name = line
        .trim()
        .trim_start_matches(['*', '+'])
        .trim();
    if name.is_empty() || name.starts_with('(') {
        return None;
    }
    Some(name.to_string())
}

// --- GitBackend (production composition) ---

/// Production backend: gix for reference enumeration, git CLI for anything
/// that touches the network or a working tree.
#[derive(Debug, Clone)]
pub struct GitBackend {
    shell: ShellBackend,
}

impl GitBackend {
    /// Build the backend, locating `git` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::GitNotFound` if no git executable is found.
    pub fn new() -> WarmResult<Self> {
        Ok(Self {
            shell: ShellBackend::new()?,
        })
    }
}

impl VersionControl for GitBackend {
    fn clone_mirror(&self, remote: &str, dest: &Path) -> WarmResult<()> {
        self.shell.clone_mirror(remote, dest)
    }

    fn clone_full(&self, remote: &str, dest: &Path) -> WarmResult<()> {
        self.shell.clone_full(remote, dest)
    }

    fn checkout(&self, repo: &Path, reference: &str) -> WarmResult<()> {
        self.shell.checkout(repo, reference)
    }

    fn list_commits(&self, repo: &Path) -> WarmResult<Vec<String>> {
        self.shell.list_commits(repo)
    }

    fn list_branches(&self, repo: &Path) -> WarmResult<Vec<String>> {
        GixBackend::list_branches(repo)
    }

    fn list_tags(&self, repo: &Path) -> WarmResult<Vec<String>> {
        GixBackend::list_tags(repo)
    }

    fn is_repo(&self, path: &Path) -> bool {
        GixBackend::is_git_repo(path)
    }
}
