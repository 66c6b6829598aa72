// archgen-config/tests/config_validation.rs
// ============================================================================
// Module: Config Validation Tests
// Description: Loading, defaults, and fail-closed validation behavior.
// ============================================================================
//! ## Overview
//! Covers the default path (absent file yields defaults), happy-path TOML
//! loading, and the fail-closed rejections.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::path::PathBuf;

use archgen_config::ArchGenConfig;
use archgen_config::ConfigError;
use archgen_config::config_toml_example;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("archgen.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn defaults_are_valid() {
    let config = ArchGenConfig::default();
    config.validate().unwrap();
    assert_eq!(config.layout.node_w, 120);
    assert!(!config.cache.enabled);
}

#[test]
fn loads_layout_overrides_from_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[layout]
node_w = 140
zone_gap = 32
"#,
    );
    let config = ArchGenConfig::load(Some(&path)).unwrap();
    assert_eq!(config.layout.node_w, 140);
    assert_eq!(config.layout.zone_gap, 32);
    // Untouched fields keep their defaults.
    assert_eq!(config.layout.node_h, 70);
}

#[test]
fn unknown_fields_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[layout]
node_width = 140
"#,
    );
    assert!(matches!(ArchGenConfig::load(Some(&path)), Err(ConfigError::Parse(_))));
}

#[test]
fn zero_node_size_fails_closed() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[layout]
node_w = 0
"#,
    );
    assert!(matches!(ArchGenConfig::load(Some(&path)), Err(ConfigError::Invalid(_))));
}

#[test]
fn oversized_dimension_fails_closed() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[layout]
margin = 50000
"#,
    );
    assert!(matches!(ArchGenConfig::load(Some(&path)), Err(ConfigError::Invalid(_))));
}

#[test]
fn classifier_default_source_is_overridable() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[classifier]
default_source = "cloud_sql"
"#,
    );
    let config = ArchGenConfig::load(Some(&path)).unwrap();
    assert_eq!(config.classifier.default_source, "cloud_sql");
}

#[test]
fn blank_classifier_default_source_fails_closed() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[classifier]
default_source = " "
"#,
    );
    assert!(matches!(ArchGenConfig::load(Some(&path)), Err(ConfigError::Invalid(_))));
}

#[test]
fn enabled_cache_requires_a_directory() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[cache]
enabled = true
"#,
    );
    assert!(matches!(ArchGenConfig::load(Some(&path)), Err(ConfigError::Invalid(_))));
}

#[test]
fn generated_example_round_trips_through_load() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &config_toml_example());
    let config = ArchGenConfig::load(Some(&path)).unwrap();
    assert_eq!(config, ArchGenConfig::default());
}

#[test]
fn explicit_missing_path_is_an_io_error() {
    let missing = PathBuf::from("/nonexistent/archgen.toml");
    assert!(matches!(ArchGenConfig::load(Some(&missing)), Err(ConfigError::Io(_))));
}
