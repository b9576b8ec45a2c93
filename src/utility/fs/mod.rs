// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities for placing installed libraries.
//!
//! ```text
//! relocate:  reset_dir()          remove + recreate empty
//!            move_dir_contents()  rename each entry, copy fallback
//!            copy_dir_contents()  recursive directory copy
//! ```

pub mod relocate;

pub use relocate::{copy_dir_contents, move_dir_contents, move_entry, reset_dir};
