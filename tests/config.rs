use taskdeck::config::Config;
use taskdeck::constants::DEFAULT_BASE_URL;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.persistence.strategy, "local");
    assert_eq!(config.persistence.local.path, None);
    assert_eq!(config.persistence.rest.base_url, DEFAULT_BASE_URL);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.file, None);

    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.persistence.strategy = "rest".to_string();
    assert!(config.validate().is_ok());

    config.persistence.strategy = "carrier-pigeon".to_string();
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("carrier-pigeon"));

    config.persistence.strategy = "rest".to_string();
    config.persistence.rest.base_url = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.persistence.local.path = Some(std::path::PathBuf::new());
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let serialized = toml::to_string(&config).unwrap();

    assert!(serialized.contains("strategy = \"local\""));
    assert!(serialized.contains("base_url"));

    let parsed: Config = toml::from_str(&serialized).unwrap();
    assert_eq!(parsed.persistence.strategy, config.persistence.strategy);
    assert_eq!(parsed.persistence.rest.base_url, config.persistence.rest.base_url);
}

#[test]
fn test_partial_config_deserialization() {
    let toml_str = r#"
        [persistence]
        strategy = "rest"

        [logging]
        enabled = true
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.persistence.strategy, "rest");
    assert_eq!(config.persistence.rest.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.persistence.local.path, None);
    assert!(config.logging.enabled);
    assert_eq!(config.logging.file, None);
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.persistence.strategy, "local");
    assert_eq!(config.persistence.rest.base_url, DEFAULT_BASE_URL);
    assert!(!config.logging.enabled);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskdeck.toml");

    let toml_str = r#"
        [persistence]
        strategy = "rest"

        [persistence.rest]
        base_url = "http://localhost:4000/api/todos"
    "#;
    std::fs::write(&path, toml_str).unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.persistence.strategy, "rest");
    assert_eq!(config.persistence.rest.base_url, "http://localhost:4000/api/todos");
}

#[test]
fn test_load_from_file_rejects_invalid_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskdeck.toml");

    std::fs::write(&path, "[persistence]\nstrategy = \"ftp\"\n").unwrap();

    assert!(Config::load_from_file(&path).is_err());
}

#[test]
fn test_generate_config_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("taskdeck").join("config.toml");

    Config::generate_default_config(&path).unwrap();

    assert!(path.exists());
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Taskdeck Configuration File"));
    assert!(content.contains("strategy = \"local\""));

    // The generated file round-trips through the loader.
    let config = Config::load_from_file(&path).unwrap();
    assert!(config.validate().is_ok());
}
