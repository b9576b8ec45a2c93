// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git access for resolution and installation.
//!
//! ```text
//!   resolve::VersionResolver     install::Installer
//!     mirror + list refs           clone + checkout
//!              \                    /
//!               v                  v
//!          backend::VersionControl (trait)
//!                      |
//!                  GitBackend
//!                  /        \
//!          GixBackend      ShellBackend
//!          (refs, read)    (clone, checkout)
//! ```

pub mod backend;

pub use backend::{GitBackend, GixBackend, ShellBackend, VersionControl};
