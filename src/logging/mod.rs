// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging for warm, built on `tracing`.
//!
//! ```text
//!                 registry
//!            /              \
//!   console (stderr)      file (optional, appended)
//!   compact, no time      full, targets, span close
//!   console_level         file_level
//!            \              /
//!       LogGuard: flushes the file writer on drop
//! ```
//!
//! Levels 3 to 5 only raise warm's own verbosity; other crates (gix in
//! particular) stay at `warn` until level 6.
//!
//! stdout is reserved for the sync report, so every log line goes to stderr.

#[cfg(test)]
mod tests;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::error::{ConfigError, Result};

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Verbosity from 0 (silent) to 6 (dump).
///
/// | level | console shows                      |
/// |-------|------------------------------------|
/// | 0     | nothing                            |
/// | 1     | errors                             |
/// | 2     | warnings (default)                 |
/// | 3     | per-dependency progress (`-v`)     |
/// | 4     | git commands and resolution detail |
/// | 5     | everything warm emits              |
/// | 6     | everything, including gix          |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LogLevel(u8);

impl Default for LogLevel {
    fn default() -> Self {
        Self::WARN
    }
}

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);
    pub const DUMP: Self = Self(6);

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` above 6.
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        if level <= Self::DUMP.0 {
            Ok(Self(level))
        } else {
            Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "output_log_level".to_string(),
                message: format!("log level must be 0-6, got {level}"),
            })
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// INFO with `--verbose`, otherwise WARN.
    #[must_use]
    pub const fn for_verbosity(verbose: bool) -> Self {
        if verbose { Self::INFO } else { Self::WARN }
    }

    /// `EnvFilter` directives for this level.
    #[must_use]
    pub fn filter_directives(self) -> String {
        let own = match self.0 {
            0 => return "off".to_string(),
            1 => return "error".to_string(),
            2 => return "warn".to_string(),
            3 => "info",
            4 => "debug",
            5 => "trace",
            _ => return "trace".to_string(),
        };
        format!("warn,{CRATE_TARGET}={own}")
    }

    fn env_filter(self) -> EnvFilter {
        EnvFilter::new(self.filter_directives())
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

/// Logging setup derived from `[global]`.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::WARN)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::TRACE)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file))]
    log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Keeps the file writer alive; drop it last in `main`.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file or its directory can't be created.
///
/// # Example
///
/// ```no_run
/// use warm::logging::{LogConfig, LogLevel, init_logging};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::INFO)
///     .with_log_file("warm.log".into())
///     .build();
/// let _guard = init_logging(&config)?;
/// tracing::info!("ready");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let mut layers: Vec<BoxedLayer> = vec![console_layer(config.console_level())];

    let file_guard = match config.log_file() {
        Some(path) => {
            let (layer, guard) = file_layer(path, config.file_level())?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry().with(layers).init();

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

fn console_layer(level: LogLevel) -> BoxedLayer {
    fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(level.env_filter())
        .boxed()
}

fn file_layer(path: &Path, level: LogLevel) -> Result<(BoxedLayer, WorkerGuard)> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(level.env_filter())
        .boxed();
    Ok((layer, guard))
}
