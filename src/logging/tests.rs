// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_verbosity_toggles_info() {
    assert_eq!(LogLevel::for_verbosity(false), LogLevel::WARN);
    assert_eq!(LogLevel::for_verbosity(true), LogLevel::INFO);
    assert_eq!(LogLevel::default(), LogLevel::WARN);
}

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::new(6).unwrap(), LogLevel::DUMP);
    let err = LogLevel::new(7).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'output_log_level' in section '[global]': log level must be 0-6, got 7"
    );
}

#[test]
fn test_filter_directives_cap_dependencies() {
    let filters: Vec<String> = (0..=6)
        .map(|n| LogLevel::new(n).unwrap().filter_directives())
        .collect();
    insta::assert_debug_snapshot!(filters, @r#"
    [
        "off",
        "error",
        "warn",
        "warn,warm=info",
        "warn,warm=debug",
        "warn,warm=trace",
        "trace",
    ]
    "#);
}

#[test]
fn test_serde_uses_plain_number() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&LogLevel::SILENT).unwrap(), "0");
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
}
