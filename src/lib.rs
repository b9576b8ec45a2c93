// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |                up / options / inis
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            |
//!   manifest --> resolve --> state --> install --> report
//!   (parse)     (classify)  (diff)   (task pool)  (aggregate)
//!                   \                  /
//!                    v                v
//!                git::backend (VersionControl)
//!                  gix refs / git CLI
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod report;
pub mod resolve;
pub mod state;
pub mod task;
pub mod utility;

#[cfg(test)]
mod test_utils;
