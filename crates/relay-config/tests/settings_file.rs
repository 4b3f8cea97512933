use std::fs;

use relay_config::{load_settings_from_file, resolve, ConfigError, RelaySettings};
use tempfile::TempDir;

#[test]
fn test_load_settings_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relay.yml");
    fs::write(
        &path,
        r#"
server:
  host: 127.0.0.1
  port: 9000
  request_timeout_secs: 15
openai:
  model: gpt-4o
github:
  base_url: https://github.example.com/api/v3
"#,
    )
    .unwrap();

    let settings = load_settings_from_file(&path).unwrap();
    assert_eq!(settings.server.bind_addr(), "127.0.0.1:9000");
    assert_eq!(settings.server.request_timeout_secs, 15);
    assert_eq!(settings.server.connect_timeout_secs, 10);
    assert_eq!(settings.openai.model, "gpt-4o");
    assert_eq!(settings.openai.base_url, "https://api.openai.com");
    assert_eq!(settings.github.base_url, "https://github.example.com/api/v3");
    assert_eq!(settings.github.api_version, "2022-11-28");
}

#[test]
fn test_empty_settings_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relay.yml");
    fs::write(&path, "{}\n").unwrap();

    let settings = load_settings_from_file(&path).unwrap();
    assert_eq!(settings, RelaySettings::default());
}

#[test]
fn test_missing_settings_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = load_settings_from_file(&dir.path().join("nope.yml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_malformed_settings_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relay.yml");
    fs::write(&path, "server:\n  port: [not, a, port]\n").unwrap();

    let err = load_settings_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_file_settings_resolve_without_credentials() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relay.yml");
    fs::write(&path, "server:\n  port: 8088\n").unwrap();

    let settings = load_settings_from_file(&path).unwrap();
    let config = resolve(settings, |_| None).unwrap();
    assert_eq!(config.server.port, 8088);
    assert!(config.credentials.github.is_none());
}

#[test]
fn test_settings_values_are_taken_literally() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relay.yml");
    fs::write(
        &path,
        "openai:\n  base_url: https://${HOST\n  model: ${OPENAI_MODEL}\n",
    )
    .unwrap();

    let settings = load_settings_from_file(&path).unwrap();
    assert_eq!(settings.openai.base_url, "https://${HOST");
    assert_eq!(settings.openai.model, "${OPENAI_MODEL}");
}
