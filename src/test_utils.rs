// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test utilities.
//!
//! Log capture for asserting warnings, throwaway git repositories built
//! with the real `git` executable, and an in-memory `VersionControl` fake.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::{GitError, WarmResult};
use crate::git::backend::VersionControl;

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs `f` while capturing tracing output at INFO and above on this thread.
///
/// Returns the closure's value and the captured log text.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferMakeWriter {
            buffer: buffer.clone(),
        })
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.lock().expect("log buffer poisoned")).to_string();
    (value, logs)
}

/// Runs git in `dir` with a fixed identity, panicking on failure.
pub(crate) fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "user.name=warm", "-c", "user.email=warm@localhost"])
        .args(["-c", "init.defaultBranch=main", "-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Creates a repository at `dir` whose single commit holds `files`.
///
/// Returns the full commit hash.
pub(crate) fn init_repo(dir: &Path, files: &[(&str, &str)]) -> String {
    std::fs::create_dir_all(dir).expect("failed to create repo dir");
    git(dir, &["init", "--quiet"]);
    commit_files(dir, files, "initial")
}

/// Writes `files` into the repository at `dir` and commits them.
///
/// Returns the new commit hash.
pub(crate) fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str) -> String {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(path, content).expect("failed to write file");
    }
    git(dir, &["add", "--all"]);
    git(dir, &["commit", "--quiet", "--allow-empty", "-m", message]);
    git(dir, &["rev-parse", "HEAD"])
}

// --- Fake version control ---

/// Scripted contents of one fake remote.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeRemote {
    pub(crate) commits: Vec<String>,
    pub(crate) branches: Vec<String>,
    pub(crate) tags: Vec<String>,
    /// Files written into a full clone, as `(relative path, content)`.
    pub(crate) files: Vec<(String, String)>,
}

impl FakeRemote {
    pub(crate) fn file(mut self, path: &str, content: &str) -> Self {
        self.files.push((path.to_string(), content.to_string()));
        self
    }
}

/// In-memory [`VersionControl`] that records every call.
///
/// Mirrors are bookkeeping only; full clones materialize the remote's files.
#[derive(Debug, Default)]
pub(crate) struct FakeVcs {
    remotes: HashMap<String, FakeRemote>,
    clones: Mutex<HashMap<PathBuf, String>>,
    mirror_clones: AtomicUsize,
    full_clones: AtomicUsize,
    checkouts: Mutex<Vec<String>>,
}

impl FakeVcs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_remote(mut self, url: &str, remote: FakeRemote) -> Self {
        self.remotes.insert(url.to_string(), remote);
        self
    }

    pub(crate) fn mirror_clones(&self) -> usize {
        self.mirror_clones.load(Ordering::SeqCst)
    }

    pub(crate) fn full_clones(&self) -> usize {
        self.full_clones.load(Ordering::SeqCst)
    }

    pub(crate) fn checkouts(&self) -> Vec<String> {
        self.checkouts.lock().expect("poisoned").clone()
    }

    fn remote_at(&self, repo: &Path) -> WarmResult<&FakeRemote> {
        let clones = self.clones.lock().expect("poisoned");
        let url = clones.get(repo).ok_or_else(|| GitError::CommandFailed {
            command: "fake".to_string(),
            message: format!("{} is not a repository", repo.display()),
        })?;
        self.remote(url)
    }

    fn remote(&self, url: &str) -> WarmResult<&FakeRemote> {
        Ok(self.remotes.get(url).ok_or_else(|| GitError::CloneFailed {
            url: url.to_string(),
            message: "repository not found".to_string(),
        })?)
    }

    fn record_clone(&self, remote: &str, dest: &Path) -> WarmResult<()> {
        self.remote(remote)?;
        std::fs::create_dir_all(dest)?;
        self.clones
            .lock()
            .expect("poisoned")
            .insert(dest.to_path_buf(), remote.to_string());
        Ok(())
    }
}

impl VersionControl for FakeVcs {
    fn clone_mirror(&self, remote: &str, dest: &Path) -> WarmResult<()> {
        self.mirror_clones.fetch_add(1, Ordering::SeqCst);
        self.record_clone(remote, dest)
    }

    fn clone_full(&self, remote: &str, dest: &Path) -> WarmResult<()> {
        self.full_clones.fetch_add(1, Ordering::SeqCst);
        self.record_clone(remote, dest)?;
        for (name, content) in &self.remote(remote)?.files {
            let path = dest.join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        Ok(())
    }

    fn checkout(&self, repo: &Path, reference: &str) -> WarmResult<()> {
        let remote = self.remote_at(repo)?;
        let found = if let Some(branch) = reference.strip_prefix("refs/remotes/origin/") {
            remote.branches.iter().any(|b| b == branch)
        } else if let Some(tag) = reference.strip_prefix("refs/tags/") {
            remote.tags.iter().any(|t| t == tag)
        } else {
            remote.commits.iter().any(|c| c.starts_with(reference))
        };
        if !found {
            return Err(GitError::CheckoutFailed {
                what: reference.to_string(),
                message: "unknown reference".to_string(),
            }
            .into());
        }
        self.checkouts
            .lock()
            .expect("poisoned")
            .push(reference.to_string());
        Ok(())
    }

    fn list_commits(&self, repo: &Path) -> WarmResult<Vec<String>> {
        Ok(self.remote_at(repo)?.commits.clone())
    }

    fn list_branches(&self, repo: &Path) -> WarmResult<Vec<String>> {
        Ok(self.remote_at(repo)?.branches.clone())
    }

    fn list_tags(&self, repo: &Path) -> WarmResult<Vec<String>> {
        Ok(self.remote_at(repo)?.tags.clone())
    }

    fn is_repo(&self, path: &Path) -> bool {
        self.clones.lock().expect("poisoned").contains_key(path)
    }
}
