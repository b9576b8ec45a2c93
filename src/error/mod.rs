// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             WarmError (16 bytes)
//!                    |
//!   +------+------+--+---+-------+-----+
//!   |      |      |      |       |     |
//!   v      v      v      v       v     v
//!  Git    Cfg   Mfst  Install   Fs    Io
//!  Box    Box   Box     Box     Box   Box
//!
//! Sub-errors (unboxed internally):
//!   Git       Gix, CommandFailed, CloneFailed, GitNotFound
//!   Config    MissingKey, InvalidValue
//!   Manifest  NotFound, Ambiguous, ReadError
//!   Install   NotALibrary, InvalidSourceDir, Relocate
//!   Fs        NotFound, IoError
//! ```
//!
//! Fatal conditions travel as `anyhow` errors up to `main`. Per-dependency
//! failures are turned into [`InstallError`] values and never cross a task
//! boundary.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`WarmError`].
pub type WarmResult<T> = std::result::Result<T, WarmError>;

/// Top-level application error type.
///
/// Every variant holds a box, so the enum stays two words wide.
#[derive(Debug, Error)]
pub enum WarmError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Manifest error.
    #[error("manifest error: {0}")]
    Manifest(#[from] Box<ManifestError>),

    /// Dependency installation error.
    #[error("install error: {0}")]
    Install(#[from] Box<InstallError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for WarmError {
                fn from(err: $error) -> Self {
                    WarmError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ManifestError => Manifest,
    InstallError => Install,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to access or iterate the reference store.
    #[error("failed to list references: {0}")]
    References(String),

    /// A single reference could not be decoded.
    #[error("failed to read reference: {0}")]
    Reference(String),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be located.
    #[error("git executable not found in PATH: {message}")]
    GitNotFound { message: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Checkout operation failed.
    #[error("failed to checkout {what}: {message}")]
    CheckoutFailed { what: String, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a configuration source.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Manifest Errors ---

/// Errors locating or reading the project manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No manifest in the project directory.
    #[error("can't find {file} in {dir} - is it named properly?")]
    NotFound { file: String, dir: String },

    /// More than one file matches the manifest name.
    #[error("found {count} candidates for {file} in {dir}, expected exactly one")]
    Ambiguous {
        file: String,
        dir: String,
        count: usize,
    },

    /// The manifest exists but could not be read.
    #[error("failed to read manifest '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Install Errors ---

/// Per-dependency install failures.
///
/// The `Display` output is the short diagnostic attached to a failed
/// install outcome.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Full clone into the scratch directory failed.
    #[error("failed to clone {url}")]
    CloneFailed { url: String },

    /// Checking out the requested reference failed.
    #[error("failed to checkout {reference}")]
    CheckoutFailed { reference: String },

    /// No properties file at the clone root.
    #[error("not a compatible library (missing {file})")]
    NotALibrary { file: String },

    /// `SRC_DIR` points outside the clone or to a missing directory.
    #[error("invalid source directory '{dir}'")]
    InvalidSourceDir { dir: String },

    /// The installed-state marker could not be written.
    #[error("failed to write install marker: {message}")]
    MarkerWrite { message: String },

    /// Moving files into the library directory failed.
    #[error("failed to move files into {target}")]
    Relocate { target: String },

    /// Scratch directory could not be prepared.
    #[error("failed to prepare scratch directory: {message}")]
    Scratch { message: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
