//! Tests for layered tool settings
//!
//! These tests pass an explicit global config path (temp directories only),
//! so the user's real config never leaks in.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use bambusy::cli::CliError;
use bambusy::config::{RawSettings, Settings};
use bambusy::exitcode;

fn write_settings(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("bambusy.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_no_global_file_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load_from(Some(dir.path().join("missing.toml").as_path())).unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.printers_file, PathBuf::from("printers.json"));
    assert_eq!(settings.calibration_delay, 3.0);
    assert_eq!(settings.connect_wait, 2.0);
    assert_eq!(settings.post_wait, 1.0);
}

#[test]
fn given_global_file_when_load_then_overrides_only_given_keys() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_settings(
        &dir,
        r#"
calibration_delay = 5.5
printers_file = "/etc/bambusy/printers.json"
"#,
    );

    // Act
    let settings = Settings::load_from(Some(path.as_path())).unwrap();

    // Assert
    assert_eq!(settings.calibration_delay, 5.5);
    assert_eq!(
        settings.printers_file,
        PathBuf::from("/etc/bambusy/printers.json")
    );
    assert_eq!(settings.connect_wait, 2.0, "untouched keys keep defaults");
}

#[test]
fn given_tilde_in_printers_file_when_load_then_expanded() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, r#"printers_file = "~/fleet/printers.json""#);

    let settings = Settings::load_from(Some(path.as_path())).unwrap();

    assert!(!settings.printers_file.to_string_lossy().starts_with('~'));
    assert!(settings.printers_file.ends_with("fleet/printers.json"));
}

#[test]
fn given_malformed_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "calibration_delay = = 3");

    let err = Settings::load_from(Some(path.as_path())).unwrap_err();

    assert!(err.is_config());
}

#[test]
fn given_unknown_key_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "calibration_dealy = 3.0");

    let err = Settings::load_from(Some(path.as_path())).unwrap_err();

    assert!(err.is_config());
}

#[test]
fn given_negative_wait_when_load_then_config_error() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "post_wait = -1.0");

    // Act
    let err = Settings::load_from(Some(path.as_path())).unwrap_err();

    // Assert
    assert!(err.is_config(), "got: {:?}", err);
    assert!(err.to_string().contains("post_wait"), "got: {}", err);
    assert_eq!(CliError::from(err).exit_code(), exitcode::CONFIG);
}

#[test]
fn given_overlay_when_merging_then_overlay_wins() {
    let overlay = RawSettings {
        connect_timeout: Some(4.0),
        keep_alive: Some(60.0),
        ..Default::default()
    };

    let merged = Settings::default().merge_with(&overlay);

    let session = merged.session_config().unwrap();
    assert_eq!(session.timeout, Duration::from_secs(4));
    assert_eq!(session.keep_alive, Duration::from_secs(60));
    assert_eq!(session.connect_wait, Duration::from_secs(2));
    assert_eq!(session.post_wait, Duration::from_secs(1));
}
