use std::fs;

use linkpad::config::{StaticConfig, get_config, init_config};
use linkpad::errors::LinkpadError;
use linkpad::repository::RepositoryOptions;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("linkpad.toml");
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_load_explicit_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[storage]
backend = "memory"
key = "links"

[shortener]
code_length = 8
default_validity_minutes = 120

[remote_log]
enabled = false
stack = "frontend"
"#,
    );

    let config = StaticConfig::load(Some(&path)).unwrap();
    assert_eq!(config.storage.backend, "memory");
    assert_eq!(config.storage.key, "links");
    // untouched fields keep their defaults
    assert_eq!(config.storage.path, "linkpad.json");
    assert_eq!(config.shortener.code_length, 8);
    assert_eq!(config.shortener.max_batch, 5);
    assert!(!config.remote_log.enabled);
    assert_eq!(config.remote_log.stack, "frontend");
    assert_eq!(config.logging.level, "warn");

    let options = RepositoryOptions::from(&config);
    assert_eq!(options.storage_key, "links");
    assert_eq!(options.code_length, 8);
    assert_eq!(options.default_validity_minutes, 120);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let result = StaticConfig::load(Some(path.to_str().unwrap()));
    assert!(matches!(result, Err(LinkpadError::Config(_))));
}

#[test]
fn test_invalid_values_are_rejected_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[shortener]\ncode_length = 42\n");

    let err = StaticConfig::load(Some(&path)).unwrap_err();
    assert!(err.message().contains("code_length"));
}

#[test]
fn test_save_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("saved.toml");

    let mut config = StaticConfig::default();
    config.shortener.base_url = "https://sho.rt".to_string();
    config.save_to_file(&path).unwrap();

    let loaded = StaticConfig::load(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(loaded.shortener.base_url, "https://sho.rt");
}

#[test]
fn test_init_config_installs_global() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[shortener]\nbase_url = \"https://global.example\"\n");

    let installed = init_config(Some(&path)).unwrap();
    assert_eq!(installed.shortener.base_url, "https://global.example");
    assert_eq!(get_config().shortener.base_url, "https://global.example");
}
