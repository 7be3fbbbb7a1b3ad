use soldera_core::{SolderaConfig, SolderaError};
use std::io::Write;
use std::time::Duration;

fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn test_toml_file_overrides_defaults() {
    let file = write_config(
        ".toml",
        r#"
[api]
base_url = "https://soldera.example.org"
csrf_token = "abc123"

[polling]
interval_ms = 250

[logging]
level = "debug"
json = true
"#,
    );

    let config = SolderaConfig::load(Some(file.path())).expect("load config");
    assert_eq!(config.api.base_url, "https://soldera.example.org");
    assert_eq!(config.api.credentials().csrf_token(), Some("abc123"));
    assert_eq!(config.polling.interval(), Duration::from_millis(250));
    // Untouched sections keep their defaults
    assert_eq!(config.notifications.auto_hide(), Duration::from_millis(3000));
    assert_eq!(config.api.timeout(), Duration::from_secs(30));
    assert!(config.logging.json);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_json_file_is_accepted() {
    let file = write_config(".json", r#"{"notifications": {"auto_hide_ms": 5000}}"#);

    let config = SolderaConfig::load(Some(file.path())).expect("load config");
    assert_eq!(config.notifications.auto_hide(), Duration::from_secs(5));
    assert_eq!(config.polling.interval(), Duration::from_secs(1));
}

#[test]
fn test_zero_interval_is_rejected() {
    let file = write_config(".toml", "[polling]\ninterval_ms = 0\n");

    let result = SolderaConfig::load(Some(file.path()));
    assert!(matches!(result, Err(SolderaError::ConfigurationError(_))));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let missing = dir.path().join("absent.toml");

    let result = SolderaConfig::load(Some(&missing));
    assert!(matches!(result, Err(SolderaError::ConfigurationError(_))));
}
