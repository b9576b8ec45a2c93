// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared helpers for integration tests: local git remotes laid out as
//! `<root>/<owner>/<repo>.git` so a path prefix works as `sync.url_prefix`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Runs git in `dir` with a fixed identity, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
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

/// Writes `files` and commits them, returning the new commit hash.
pub fn commit(dir: &Path, files: &[(&str, &str)], message: &str) -> String {
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

/// A directory of local remotes.
pub struct Remotes {
    root: PathBuf,
}

impl Remotes {
    pub fn new(root: PathBuf) -> Self {
        std::fs::create_dir_all(&root).expect("failed to create remotes root");
        Self { root }
    }

    /// Value for `sync.url_prefix`.
    pub fn url_prefix(&self) -> String {
        format!("{}/", self.root.display())
    }

    pub fn path(&self, owner: &str, repo: &str) -> PathBuf {
        self.root.join(owner).join(format!("{repo}.git"))
    }

    /// Creates `owner/repo` with one commit holding `files`.
    pub fn create(&self, owner: &str, repo: &str, files: &[(&str, &str)]) -> PathBuf {
        let path = self.path(owner, repo);
        std::fs::create_dir_all(&path).expect("failed to create remote dir");
        git(&path, &["init", "--quiet"]);
        commit(&path, files, "initial");
        path
    }
}
