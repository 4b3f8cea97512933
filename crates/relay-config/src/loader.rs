use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::schema::{Credentials, RelayConfig, RelaySettings};
use crate::{ConfigError, Credential};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const GITHUB_API_KEY: &str = "GITHUB_API_KEY";

const RELAY_HOST: &str = "RELAY_HOST";
const RELAY_PORT: &str = "RELAY_PORT";
const RELAY_REQUEST_TIMEOUT_SECS: &str = "RELAY_REQUEST_TIMEOUT_SECS";
const RELAY_CONNECT_TIMEOUT_SECS: &str = "RELAY_CONNECT_TIMEOUT_SECS";
const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
const OPENAI_MODEL: &str = "OPENAI_MODEL";
const GITHUB_BASE_URL: &str = "GITHUB_BASE_URL";

const SETTINGS_CANDIDATES: &[&str] = &["relay.yml", "relay.yaml"];

/// Where to look for configuration at startup.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit settings file. When unset, [`find_settings_file`] is used.
    pub config_path: Option<PathBuf>,

    /// Explicit env file. When unset, `.env` is loaded if present.
    pub env_file: Option<PathBuf>,
}

/// Loads the env file, the settings file and the process environment into
/// a [`RelayConfig`].
pub fn load_config(options: &LoadOptions) -> Result<RelayConfig, ConfigError> {
    load_env_file(options.env_file.as_deref())?;

    let settings = match options.config_path.clone().or_else(find_settings_file) {
        Some(path) => load_settings_from_file(&path)?,
        None => RelaySettings::default(),
    };

    resolve(settings, |key| env::var(key).ok())
}

/// Applies environment overrides from `lookup` on top of `settings`, then
/// validates the result and reads the credentials.
pub fn resolve<F>(mut settings: RelaySettings, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    apply_env_overrides(&mut settings, &lookup)?;
    validate(&settings)?;

    let credentials = Credentials {
        openai: Credential::from_env_value(lookup(OPENAI_API_KEY)),
        github: Credential::from_env_value(lookup(GITHUB_API_KEY)),
    };

    if credentials.openai.is_none() {
        debug!("{} not set; /mcp will report a configuration error", OPENAI_API_KEY);
    }
    if credentials.github.is_none() {
        debug!(
            "{} not set; GitHub routes will report a configuration error",
            GITHUB_API_KEY
        );
    }

    Ok(RelayConfig::from_settings(settings, credentials))
}

fn load_env_file(path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)?;
            debug!(path = %path.display(), "loaded env file");
        }
        None => match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded env file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}

pub fn find_settings_file() -> Option<PathBuf> {
    SETTINGS_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

pub fn load_settings_from_file(path: &Path) -> Result<RelaySettings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let settings: RelaySettings =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "loaded settings file");
    Ok(settings)
}

fn apply_env_overrides<F>(settings: &mut RelaySettings, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(RELAY_HOST) {
        settings.server.host = host;
    }
    if let Some(port) = parse_env(lookup, RELAY_PORT)? {
        settings.server.port = port;
    }
    if let Some(secs) = parse_env(lookup, RELAY_REQUEST_TIMEOUT_SECS)? {
        settings.server.request_timeout_secs = secs;
    }
    if let Some(secs) = parse_env(lookup, RELAY_CONNECT_TIMEOUT_SECS)? {
        settings.server.connect_timeout_secs = secs;
    }
    if let Some(url) = lookup(OPENAI_BASE_URL) {
        settings.openai.base_url = url;
    }
    if let Some(model) = lookup(OPENAI_MODEL) {
        settings.openai.model = model;
    }
    if let Some(url) = lookup(GITHUB_BASE_URL) {
        settings.github.base_url = url;
    }
    Ok(())
}

fn parse_env<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                key: key.to_string(),
                value,
            }),
    }
}

fn validate(settings: &RelaySettings) -> Result<(), ConfigError> {
    validate_base_url("openai", &settings.openai.base_url)?;
    validate_base_url("github", &settings.github.base_url)?;

    if settings.server.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "request_timeout_secs must be greater than 0".to_string(),
        ));
    }
    if settings.server.connect_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "connect_timeout_secs must be greater than 0".to_string(),
        ));
    }
    if settings.openai.model.trim().is_empty() {
        return Err(ConfigError::Invalid("openai model must not be empty".to_string()));
    }
    Ok(())
}

fn validate_base_url(name: &'static str, raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        name,
        url: raw.to_string(),
        reason,
    };

    let url = url::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_with_empty_environment() {
        let config = resolve(RelaySettings::default(), lookup_from(&[])).unwrap();
        assert_eq!(config.server.port, 8000);
        assert!(config.credentials.openai.is_none());
        assert!(config.credentials.github.is_none());
    }

    #[test]
    fn test_resolve_reads_credentials() {
        let config = resolve(
            RelaySettings::default(),
            lookup_from(&[(OPENAI_API_KEY, "sk-test"), (GITHUB_API_KEY, "ghp_test")]),
        )
        .unwrap();
        assert_eq!(config.credentials.openai.unwrap().expose(), "sk-test");
        assert_eq!(config.credentials.github.unwrap().expose(), "ghp_test");
    }

    #[test]
    fn test_env_overrides_settings() {
        let mut settings = RelaySettings::default();
        settings.server.port = 9000;
        settings.openai.model = "from-file".to_string();

        let config = resolve(
            settings,
            lookup_from(&[
                (RELAY_HOST, "127.0.0.1"),
                (RELAY_PORT, "8081"),
                (RELAY_REQUEST_TIMEOUT_SECS, "5"),
                (OPENAI_MODEL, "gpt-4o"),
                (GITHUB_BASE_URL, "http://localhost:9999"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.server.request_timeout_secs, 5);
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.github.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = resolve(
            RelaySettings::default(),
            lookup_from(&[(RELAY_PORT, "eighty")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref key, .. } if key == RELAY_PORT));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = resolve(
            RelaySettings::default(),
            lookup_from(&[(RELAY_REQUEST_TIMEOUT_SECS, "0")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_non_http_base_url_is_rejected() {
        let err = resolve(
            RelaySettings::default(),
            lookup_from(&[(OPENAI_BASE_URL, "ftp://example.com")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { name: "openai", .. }));

        let err = resolve(
            RelaySettings::default(),
            lookup_from(&[(GITHUB_BASE_URL, "not a url")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { name: "github", .. }));
    }
}
