// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `warm options` and `warm inis`.

use std::io::{self, Write};

use crate::config::Config;

/// Print every effective option as `section.key = value`, sorted by key.
///
/// # Errors
///
/// Returns an error if `out` can't be written.
pub fn run_options_command(config: &Config, out: &mut impl Write) -> io::Result<()> {
    for line in config.format_options() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Print the configuration files in load order, lowest priority first.
///
/// # Errors
///
/// Returns an error if `out` can't be written.
pub fn run_inis_command(loaded_files: &[String], out: &mut impl Write) -> io::Result<()> {
    if loaded_files.is_empty() {
        return writeln!(out, "no configuration files loaded");
    }
    loaded_files
        .iter()
        .try_for_each(|line| writeln!(out, "{line}"))
}
