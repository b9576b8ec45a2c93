// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::loader::ConfigSource;
use super::{Config, ConfigLoader, PathsConfig};
use crate::config::types::SyncConfig;
use crate::logging::LogLevel;
use std::path::{Path, PathBuf};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(!config.global.verbose);
    assert_eq!(config.global.console_level(), LogLevel::WARN);
    assert_eq!(config.sync.workers, 4);
    assert_eq!(config.sync.manifest_file, "dependencies.warm");
    assert_eq!(config.sync.properties_file, "library.warm");
    assert_eq!(config.sync.marker_file, ".warm-state.json");
    assert!(config.paths.libraries.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
verbose = true

[paths]
libraries = "/opt/arduino/libraries"

[sync]
workers = 8
url_prefix = "git@github.com:"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.console_level(), LogLevel::INFO);
    assert_eq!(
        config.require_libraries().unwrap(),
        Path::new("/opt/arduino/libraries")
    );
    assert_eq!(config.sync.workers, 8);
    assert_eq!(
        config.sync.remote_url("windykeyboards", "butt-in"),
        "git@github.com:windykeyboards/butt-in.git"
    );
}

#[test]
fn test_explicit_log_level_beats_verbose() {
    let config = Config::parse("[global]\nverbose = true\noutput_log_level = 1\n").unwrap();
    assert_eq!(config.global.console_level(), LogLevel::ERROR);
}

#[test]
fn test_unknown_field_rejected() {
    let result = Config::parse("[sync]\nthreads = 3\n");
    assert!(result.is_err());
}

#[test]
fn test_zero_workers_rejected() {
    let result = Config::parse("[sync]\nworkers = 0\n");
    let err = result.unwrap_err();
    assert!(
        err.to_string().contains("workers"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_marker_file_must_be_plain_name() {
    let mut config = Config::default();
    config.sync.marker_file = "nested/.state".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_missing_libraries_is_error() {
    let config = Config::default();
    let err = config.require_libraries().unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'libraries' in section '[paths]'"
    );
}

#[test]
fn test_empty_libraries_is_missing() {
    let paths = PathsConfig {
        libraries: Some(PathBuf::new()),
        ..Default::default()
    };
    assert!(paths.libraries().is_err());
}

#[test]
fn test_set_overrides_apply_last() {
    let config = ConfigLoader::new()
        .add_toml_str("[sync]\nworkers = 2\n")
        .set_raw("sync.workers=6")
        .unwrap()
        .set_raw("paths.libraries = /tmp/libs")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.sync.workers, 6);
    assert_eq!(config.paths.libraries, Some(PathBuf::from("/tmp/libs")));
}

#[test]
fn test_set_raw_requires_equals() {
    assert!(ConfigLoader::new().set_raw("sync.workers").is_err());
    assert!(ConfigLoader::new().set_raw("=3").is_err());
}

#[test]
fn test_remote_url_prefixes() {
    let mut sync = SyncConfig::default();
    let github = sync.remote_url("owner", "repo");
    sync.url_prefix = "https://git.example.com".to_string();
    let bare_host = sync.remote_url("owner", "repo");
    insta::assert_debug_snapshot!((github, bare_host), @r#"
    (
        "https://github.com/owner/repo.git",
        "https://git.example.com/owner/repo.git",
    )
    "#);
}

#[test]
fn test_format_options() {
    let mut config = Config::default();
    config.paths.libraries = Some(PathBuf::from("/libs"));
    let options = config.format_options();
    insta::assert_debug_snapshot!(options, @r#"
    [
        "global.file_log_level   = 5",
        "global.log_file         = ",
        "global.output_log_level = 2",
        "global.verbose          = false",
        "paths.libraries         = /libs",
        "paths.project           = ",
        "paths.scratch           = ",
        "sync.manifest_file      = dependencies.warm",
        "sync.marker_file        = .warm-state.json",
        "sync.properties_file    = library.warm",
        "sync.url_prefix         = https://github.com/",
        "sync.workers            = 4",
    ]
    "#);
}

#[test]
fn test_loaded_files_tracks_sources() {
    let loader = ConfigLoader::new()
        .add_toml_str("")
        .add_toml_file_optional("/definitely/not/here/warm.toml")
        .with_project_file(Path::new("/definitely/not/here"));
    insta::assert_debug_snapshot!(loader.format_loaded_files(), @r#"
    [
        "1. [inline] <string>",
    ]
    "#);
}

#[test]
fn test_project_file_is_layered_first() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join("warm.toml"),
        "[paths]\nlibraries = \"/project/libs\"\n[sync]\nworkers = 2\n",
    )
    .unwrap();

    let loader = ConfigLoader::new()
        .with_project_file(temp.path())
        .add_toml_str("[sync]\nworkers = 3\n");
    assert_eq!(
        loader.sources(),
        [
            ConfigSource::Project(temp.path().join("warm.toml")),
            ConfigSource::Inline,
        ]
    );
    let config = loader.build().unwrap();
    assert_eq!(config.sync.workers, 3);
    assert_eq!(config.paths.libraries, Some(PathBuf::from("/project/libs")));
}
