// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::Path;

/// Recursively copies all contents from src directory to dst directory.
///
/// Creates dst if it doesn't exist. Symlinks are recreated, not followed,
/// so a link to a directory is never copied by value and link cycles can't
/// recurse.
///
/// # Example
/// ```no_run
/// use warm::utility::fs::relocate::copy_dir_contents;
/// use std::path::Path;
///
/// copy_dir_contents(Path::new("/source/dir"), Path::new("/dest/dir"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    for entry in std::fs::read_dir(src)
        .with_context(|| format!("failed to read directory {}", src.display()))?
    {
        let entry =
            entry.with_context(|| format!("failed to read entry from {}", src.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to stat {}", entry.path().display()))?;
        copy_entry(&entry.path(), &dst.join(entry.file_name()), file_type)?;
    }

    Ok(())
}

fn copy_entry(src: &Path, dst: &Path, file_type: std::fs::FileType) -> Result<()> {
    if file_type.is_symlink() {
        copy_symlink(src, dst)
    } else if file_type.is_dir() {
        copy_dir_contents(src, dst)
    } else {
        std::fs::copy(src, dst)
            .map(drop)
            .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))
    }
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target = std::fs::read_link(src)
        .with_context(|| format!("failed to read link {}", src.display()))?;
    std::os::unix::fs::symlink(&target, dst)
        .with_context(|| format!("failed to create link {}", dst.display()))
}

#[cfg(windows)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target = std::fs::read_link(src)
        .with_context(|| format!("failed to read link {}", src.display()))?;
    let metadata = std::fs::metadata(src);
    let created = if metadata.is_ok_and(|m| m.is_dir()) {
        std::os::windows::fs::symlink_dir(&target, dst)
    } else {
        std::os::windows::fs::symlink_file(&target, dst)
    };
    created.with_context(|| format!("failed to create link {}", dst.display()))
}

/// Moves one file or directory, falling back to copy-then-remove when a
/// rename is impossible (e.g. across filesystems).
///
/// # Errors
///
/// Returns an error if both the rename and the fallback fail.
pub fn move_entry(src: &Path, dst: &Path) -> Result<()> {
    let Err(rename_error) = std::fs::rename(src, dst) else {
        return Ok(());
    };
    tracing::trace!(
        error = %rename_error,
        "rename {} failed, copying instead",
        src.display()
    );

    let file_type = std::fs::symlink_metadata(src)
        .with_context(|| format!("failed to stat {}", src.display()))?
        .file_type();
    copy_entry(src, dst, file_type)?;
    let removed = if file_type.is_dir() {
        std::fs::remove_dir_all(src)
    } else {
        std::fs::remove_file(src)
    };
    removed.with_context(|| format!("failed to remove {}", src.display()))
}

/// Moves every entry of `src` into `dst`, one by one.
///
/// Creates dst if it doesn't exist. Returns the number of moved entries.
///
/// # Errors
///
/// Returns an error on the first entry that can't be moved.
pub fn move_dir_contents(src: &Path, dst: &Path) -> Result<usize> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut moved = 0;
    for entry in std::fs::read_dir(src)
        .with_context(|| format!("failed to read directory {}", src.display()))?
    {
        let entry =
            entry.with_context(|| format!("failed to read entry from {}", src.display()))?;
        move_entry(&entry.path(), &dst.join(entry.file_name()))?;
        moved += 1;
    }
    Ok(moved)
}

/// Removes `path` if present and recreates it as an empty directory.
///
/// # Errors
///
/// Returns an error if the old directory can't be removed or the new one
/// can't be created.
pub fn reset_dir(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
    }
    std::fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory {}", path.display()))?;
    Ok(())
}
