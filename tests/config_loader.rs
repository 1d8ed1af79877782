use argsift::args::{StorageMode, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_RESPONSE_DEPTH};
use argsift::config::{Config, ConfigError};
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.storage, StorageMode::Static);
    assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
    assert!(config.response_files);
    assert_eq!(config.max_response_depth, DEFAULT_MAX_RESPONSE_DEPTH);
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("argsift/config.toml"));
}

/// Test that an empty file yields all defaults.
#[test]
fn test_empty_file_uses_defaults() {
    let (_dir, path) = write_config("");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

/// Test that every field can be set.
#[test]
fn test_full_config() {
    let (_dir, path) = write_config(
        r#"storage = "dynamic"
initial_capacity = 16
response_files = false
max_response_depth = 4
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.storage, StorageMode::Dynamic);
    assert_eq!(config.initial_capacity, 16);
    assert!(!config.response_files);
    assert_eq!(config.max_response_depth, 4);
}

/// Test that an unknown storage mode is a parse error.
#[test]
fn test_unknown_storage_mode_fails() {
    let (_dir, path) = write_config("storage = \"mmap\"\n");

    match Config::load_from(&path).unwrap_err() {
        ConfigError::ParseError { path: p, .. } => assert_eq!(p, path),
        e => panic!("Expected ParseError, got {:?}", e),
    }
}

/// Test validation fails on a zero capacity.
#[test]
fn test_validation_fails_zero_capacity() {
    let (_dir, path) = write_config("initial_capacity = 0\n");

    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("initial_capacity"));
        }
        e => panic!("Expected ValidationError, got {:?}", e),
    }
}

/// Test validation fails on a zero nesting depth.
#[test]
fn test_validation_fails_zero_depth() {
    let config = Config {
        max_response_depth: 0,
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

/// Test that a missing file is a read error.
#[test]
fn test_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
    assert!(err.to_string().contains("absent.toml"));
}
