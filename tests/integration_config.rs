// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::path::{Path, PathBuf};

use warm::config::Config;
use warm::logging::LogLevel;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
verbose = true
file_log_level = 4
log_file = "/var/log/warm.log"

[paths]
project = "/work/keyboard"
libraries = "/work/keyboard/lib"
scratch = "/tmp/warm"

[sync]
workers = 2
url_prefix = "ssh://git@example.org/"
"#;
    let config = Config::parse(toml).unwrap();
    assert!(config.global.verbose);
    assert_eq!(config.global.file_log_level, LogLevel::DEBUG);
    assert_eq!(
        config.global.log_file.as_deref(),
        Some(Path::new("/var/log/warm.log"))
    );
    assert_eq!(config.paths.scratch_dir(), PathBuf::from("/tmp/warm"));
    assert_eq!(config.sync.workers, 2);
    assert_eq!(
        config.sync.remote_url("acme", "led"),
        "ssh://git@example.org/acme/led.git"
    );
    assert_eq!(config.sync.manifest_file, "dependencies.warm");
}

#[test]
fn config_parse_rejects_unknown_section() {
    assert!(Config::parse("[remote]\nhost = \"example.org\"\n").is_err());
}

#[test]
fn config_parse_rejects_bad_log_level() {
    assert!(Config::parse("[global]\noutput_log_level = 9\n").is_err());
}

#[test]
fn config_parse_rejects_nested_marker_name() {
    let err = Config::parse("[sync]\nmarker_file = \"state/marker.json\"\n").unwrap_err();
    assert!(err.to_string().contains("marker_file"), "{err}");
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_later_files_win() {
    let temp = tempfile::tempdir().unwrap();
    let base = write(
        temp.path(),
        "warm.toml",
        "[paths]\nlibraries = \"/base/lib\"\n[sync]\nworkers = 2\n",
    );
    let local = write(temp.path(), "local.toml", "[sync]\nworkers = 6\n");

    let config = Config::builder()
        .add_toml_file(&base)
        .add_toml_file(&local)
        .build()
        .unwrap();
    assert_eq!(config.sync.workers, 6);
    assert_eq!(
        config.require_libraries().unwrap(),
        Path::new("/base/lib")
    );
}

#[test]
fn config_set_beats_files() {
    let temp = tempfile::tempdir().unwrap();
    let file = write(temp.path(), "warm.toml", "[sync]\nworkers = 2\n");

    let config = Config::builder()
        .add_toml_file(&file)
        .set_raw("sync.workers=12")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.sync.workers, 12);
}

#[test]
fn config_optional_file_may_be_absent() {
    let temp = tempfile::tempdir().unwrap();
    let config = Config::builder()
        .add_toml_file_optional(temp.path().join("warm.toml"))
        .build()
        .unwrap();
    assert!(config.require_libraries().is_err());
}

#[test]
fn config_required_file_must_exist() {
    let temp = tempfile::tempdir().unwrap();
    let result = Config::builder()
        .add_toml_file(temp.path().join("missing.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_loaded_files_are_listed() {
    let temp = tempfile::tempdir().unwrap();
    let file = write(temp.path(), "extra.toml", "[sync]\nworkers = 3\n");

    let loader = Config::builder()
        .add_toml_file_optional(temp.path().join("warm.toml"))
        .add_toml_file(&file);
    let listed = loader.format_loaded_files();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].contains("extra.toml"), "{listed:?}");
}

#[test]
fn config_options_listing_is_sorted() {
    let config = Config::parse("[paths]\nlibraries = \"/lib\"\n").unwrap();
    let options = config.format_options();
    let mut sorted = options.clone();
    sorted.sort();
    assert_eq!(options, sorted);
    assert!(options.iter().any(|line| line.contains("/lib")), "{options:?}");
}
