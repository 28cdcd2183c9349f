use countdown_timers::config::{Config, load_from_path, save_to_path};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_valid() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let config_content = r#"
        [display]
        viewport_width = 600

        [alerts]
        sound = false

        [logging]
        level = "debug"
    "#;
    temp_file.write_all(config_content.as_bytes()).unwrap();

    let config = load_from_path(temp_file.path()).expect("Failed to load valid config");

    assert_eq!(config.display.viewport_width, Some(600));
    assert!(!config.alerts.sound);
    assert_eq!(config.logging.level, "debug");
    assert!(config.storage.state_dir_override.is_none());
}

#[test]
fn test_load_config_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"").unwrap();

    let config = load_from_path(temp_file.path()).expect("Empty config uses defaults");
    assert_eq!(config.display.viewport_width, None);
    assert!(config.alerts.sound);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_load_config_rejects_invalid_values() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[display]\nviewport_width = 0\n")
        .unwrap();

    assert!(load_from_path(temp_file.path()).is_err());
}

#[test]
fn test_save_and_reload() {
    let temp_file = NamedTempFile::new().unwrap();
    let mut config = Config::default();
    config.display.viewport_width = Some(1440);
    config.logging.level = "info".to_string();

    save_to_path(&config, temp_file.path()).unwrap();
    let loaded = load_from_path(temp_file.path()).unwrap();

    assert_eq!(loaded.display.viewport_width, Some(1440));
    assert_eq!(loaded.logging.level, "info");
}
