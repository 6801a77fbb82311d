//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use bowling_lane::config::AppConfig;
use serial_test::serial;

/// Fresh config directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bowling_lane_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    let config = AppConfig::load().unwrap();
    let builtin = AppConfig::default();
    assert_eq!(config.lane, builtin.lane);
    assert_eq!(config.pins, builtin.pins);
    assert_eq!(config.ball, builtin.ball);
    assert_eq!(config.scene.recolor_key, 'c');
    assert_eq!(config.scene.lights.len(), 2);
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("BOWL_LANE__WIDTH", "1.2");
    std::env::set_var("BOWL_DEBUG__LOG_LEVEL", "debug");
    let config = AppConfig::load();
    std::env::remove_var("BOWL_LANE__WIDTH");
    std::env::remove_var("BOWL_DEBUG__LOG_LEVEL");

    let config = config.unwrap();
    assert_eq!(config.lane.width, 1.2);
    assert_eq!(config.debug.log_level, "debug");
    // Untouched keys keep their file values
    assert_eq!(config.lane.height, 0.2);
}

#[test]
#[serial]
fn test_user_config_overrides_default() {
    let dir = scratch_dir("user");
    fs::copy("config/default.toml", dir.join("default.toml")).unwrap();
    fs::write(
        dir.join("user.toml"),
        "[pins]\ndistance_between_pins = 0.35\n\n[scene]\nball_start_z = 2.5\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.pins.distance_between_pins, 0.35);
    assert_eq!(config.pins.diameter, 0.18);
    assert_eq!(config.scene.ball_start_z, 2.5);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("/nonexistent/bowling_config").unwrap();
    assert_eq!(config.lane, AppConfig::default().lane);
}

#[test]
#[serial]
fn test_malformed_value_is_an_error() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("default.toml"), "[lane]\nwidth = \"wide\"\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));

    fs::remove_dir_all(&dir).unwrap();
}
