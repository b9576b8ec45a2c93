// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   up, config (options, inis)
//! ```

pub mod config;
pub mod up;
