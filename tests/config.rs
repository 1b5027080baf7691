use taigalist::config::Config;
use taigalist::constants::{API_PREFIX, DEFAULT_SERVER_URL};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.server.url, DEFAULT_SERVER_URL);
    assert_eq!(config.server.api_prefix, API_PREFIX);
    assert_eq!(config.server.timeout_seconds, 30);
    assert_eq!(config.paging.page_size, 20);
    assert!(!config.logging.enabled);
    assert!(config.session.persist);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Invalid page size should fail
    config.paging.page_size = 0;
    assert!(config.validate().is_err());
    config.paging.page_size = 500;
    assert!(config.validate().is_err());

    // Reset and test invalid timeout
    config.paging.page_size = 20;
    config.server.timeout_seconds = 0;
    assert!(config.validate().is_err());

    config.server.timeout_seconds = 30;
    config.server.url = "not a url".to_string();
    assert!(config.validate().is_err());

    config.server.url = "ftp://taiga.example.com".to_string();
    assert!(config.validate().is_err());

    config.server.url = "http://localhost:9000".to_string();
    config.server.api_prefix = "api/v1/".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("url = \"https://api.taiga.io\""));
    assert!(toml_str.contains("page_size = 20"));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[server]
url = "https://taiga.example.com"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.server.url, "https://taiga.example.com");
    assert!(config.logging.enabled);

    // Check that unspecified values use defaults
    assert_eq!(config.server.api_prefix, API_PREFIX);
    assert_eq!(config.server.timeout_seconds, 30);
    assert_eq!(config.paging.page_size, 20);
    assert!(config.session.persist);
}

#[test]
fn test_empty_config_deserialization() {
    // Test that empty TOML uses all defaults
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.server.url, default_config.server.url);
    assert_eq!(config.paging.page_size, default_config.paging.page_size);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
    assert_eq!(config.session.persist, default_config.session.persist);
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taigalist.toml");
    std::fs::write(&path, "[paging]\npage_size = 1000\n").unwrap();

    assert!(Config::load_from_file(&path).is_err());
}

#[test]
fn test_generate_config_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nested").join("config.toml");
    assert!(!config_path.parent().unwrap().exists());

    // Generate config should create the directory structure
    Config::generate_default_config(&config_path).unwrap();
    assert!(config_path.exists());

    // Verify the file contains expected content
    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# taigalist Configuration File"));
    assert!(content.contains("page_size = 20"));

    // The generated file loads back
    let loaded = Config::load_from_file(&config_path).unwrap();
    assert_eq!(loaded.server.url, DEFAULT_SERVER_URL);
}
