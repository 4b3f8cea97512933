use serde::{Deserialize, Serialize};

use crate::Credential;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_API_VERSION: &str = "2022-11-28";

/// Non-secret relay settings, as read from `relay.yml`.
///
/// # Example
///
/// ```yaml
/// server:
///   host: 127.0.0.1
///   port: 8080
///   request_timeout_secs: 15
/// openai:
///   model: gpt-4o
/// github:
///   base_url: https://github.example.com/api/v3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySettings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub openai: OpenAiSettings,

    #[serde(default)]
    pub github: GitHubSettings,
}

/// Listener and upstream timeout settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Total time allowed for one upstream call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Time allowed to establish an upstream connection, in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chat completion upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiSettings {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            model: default_openai_model(),
        }
    }
}

/// GitHub REST upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubSettings {
    #[serde(default = "default_github_base_url")]
    pub base_url: String,

    /// Value of the `X-GitHub-Api-Version` header
    #[serde(default = "default_github_api_version")]
    pub api_version: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            base_url: default_github_base_url(),
            api_version: default_github_api_version(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}

fn default_github_base_url() -> String {
    DEFAULT_GITHUB_BASE_URL.to_string()
}

fn default_github_api_version() -> String {
    DEFAULT_GITHUB_API_VERSION.to_string()
}

/// Upstream credentials, each absent when its variable is unset or blank.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai: Option<Credential>,
    pub github: Option<Credential>,
}

/// Fully resolved process configuration.
///
/// Built once at startup and shared read-only for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
    pub github: GitHubSettings,
    pub credentials: Credentials,
}

impl RelayConfig {
    pub fn from_settings(settings: RelaySettings, credentials: Credentials) -> Self {
        Self {
            server: settings.server,
            openai: settings.openai,
            github: settings.github,
            credentials,
        }
    }

    pub fn with_openai_key(mut self, key: impl Into<String>) -> Self {
        self.credentials.openai = Some(Credential::new(key));
        self
    }

    pub fn with_github_key(mut self, key: impl Into<String>) -> Self {
        self.credentials.github = Some(Credential::new(key));
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai.base_url = url.into();
        self
    }

    pub fn with_github_base_url(mut self, url: impl Into<String>) -> Self {
        self.github.base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.openai.base_url, "https://api.openai.com");
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.github.base_url, "https://api.github.com");
        assert!(config.credentials.openai.is_none());
        assert!(config.credentials.github.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
server:
  port: 9000
openai:
  model: gpt-4o
"#;
        let settings: RelaySettings = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.openai.model, "gpt-4o");
        assert_eq!(settings.openai.base_url, "https://api.openai.com");
        assert_eq!(settings.github, GitHubSettings::default());
    }

    #[test]
    fn test_debug_does_not_leak_credentials() {
        let config = RelayConfig::default()
            .with_openai_key("sk-live-123")
            .with_github_key("ghp_live_456");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-live-123"));
        assert!(!debug.contains("ghp_live_456"));
    }
}
