//! Config loading as seen by the binary.

use std::fs;

use ward_config::{ConfigError, WardConfig};
use ward_types::UiOptions;

#[test]
fn unreadable_config_surfaces_its_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "app = 3").expect("write");

    let err = WardConfig::load_from(&path).expect_err("app must be a table");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn theme_options_flow_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[app]\nascii_only = true\n").expect("write");

    let options = WardConfig::load_from(&path)
        .expect("load")
        .map(|config| config.ui_options())
        .unwrap_or_default();
    assert_eq!(
        options,
        UiOptions {
            ascii_only: true,
            high_contrast: false,
        }
    );
}
