use depchain::config::{load_config, save_config, DepchainConfig};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = DepchainConfig::default();
    assert_eq!(config.extensions, vec!["js".to_string()]);
    assert_eq!(config.load_paths, vec![".".to_string()]);
}

#[test]
fn test_missing_file_yields_default() {
    let dir = TempDir::new().unwrap();
    let loaded = load_config(&dir.path().join("absent.json")).unwrap();
    assert_eq!(loaded, DepchainConfig::default());
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("depchain.json");

    let config = DepchainConfig {
        extensions: vec!["js".to_string(), "coffee".to_string()],
        load_paths: vec!["assets".to_string(), "vendor/assets".to_string()],
    };
    save_config(&path, &config).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_malformed_config_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("depchain.json");
    std::fs::write(&path, "not json").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().starts_with("config error"), "got: {err}");
}

#[test]
fn test_config_serde_roundtrip() {
    let config = DepchainConfig::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let deserialized: DepchainConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, deserialized);
}
